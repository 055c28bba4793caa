//! Issue commands: report, list, show, comment, upvote, set-status

use crate::context::CliContext;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_WARNING;
use civicreport::{sort_for_display, Category, Issue, IssueDraft, Location, Status};
use colored::{ColoredString, Colorize};
use tabled::{Table, Tabled};

/// Status text colored the way the original tracker badges it
fn colorize_status(status: Status) -> ColoredString {
    match status {
        Status::Pending => status.name().red(),
        Status::InProgress => status.name().yellow(),
        Status::Resolved => status.name().green(),
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn run_report(
    title: String,
    category: String,
    description: String,
    lat: Option<f64>,
    lng: Option<f64>,
    address: Option<String>,
    media_url: Option<String>,
) -> CliResult<()> {
    let context = CliContext::new()?;

    let category: Category = category.parse()?;
    let mut draft = IssueDraft::new(title, category, description);
    if let (Some(lat), Some(lng)) = (lat, lng) {
        draft = draft.with_location(Location { lat, lng, address });
    }
    if let Some(media_url) = media_url {
        draft = draft.with_media_url(media_url);
    }

    let issue = context.repository.add(draft).await?;
    println!(
        "Report submitted: {} ({})",
        issue.id.to_string().bold(),
        issue.title
    );
    println!("Reported by {} as {}", issue.reporter_name, issue.status);
    Ok(())
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Reporter")]
    reporter: String,
    #[tabled(rename = "Reported")]
    reported: String,
    #[tabled(rename = "Votes")]
    upvotes: u32,
    #[tabled(rename = "Comments")]
    comments: usize,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.to_string(),
            status: issue.status.to_string(),
            title: issue.title.clone(),
            category: issue.category.to_string(),
            reporter: issue.reporter_name.clone(),
            reported: issue.reported_on.format("%Y-%m-%d").to_string(),
            upvotes: issue.upvotes,
            comments: issue.comments.len(),
        }
    }
}

pub async fn run_list(json: bool) -> CliResult<()> {
    let context = CliContext::new()?;

    let mut issues = context.repository.get_all().await?;
    sort_for_display(&mut issues);

    if json {
        let serialized = serde_json::to_string_pretty(&issues)
            .map_err(civicreport::CivicReportError::from)?;
        println!("{serialized}");
        return Ok(());
    }

    if issues.is_empty() {
        println!("No community issues have been reported yet.");
        return Ok(());
    }

    let rows: Vec<IssueRow> = issues.iter().map(IssueRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn run_show(id: String) -> CliResult<()> {
    let context = CliContext::new()?;
    let issue = context.find_issue(&id).await?;

    println!("{}", issue.title.bold());
    println!(
        "{} | {} | reported by {} on {}",
        colorize_status(issue.status),
        issue.category,
        issue.reporter_name,
        issue.reported_on.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(resolved_on) = issue.resolved_on {
        println!("Resolved on {}", resolved_on.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(location) = &issue.location {
        match &location.address {
            Some(address) => println!("Location: {address} ({}, {})", location.lat, location.lng),
            None => println!("Location: {}, {}", location.lat, location.lng),
        }
    }
    if let Some(media_url) = &issue.media_url {
        println!("Media: {media_url}");
    }
    println!("\n{}", issue.description);
    println!("\nUpvotes: {}", issue.upvotes);

    println!("\nDiscussion ({})", issue.comments.len());
    if issue.comments.is_empty() {
        println!("  No comments yet. Be the first to engage.");
    }
    for comment in &issue.comments {
        let author = if comment.role == civicreport::Role::Admin {
            format!("{} [ADMIN]", comment.author).cyan()
        } else {
            comment.author.normal()
        };
        println!(
            "  #{} {} ({}): {}",
            comment.comment_id,
            author,
            comment.timestamp.format("%Y-%m-%d %H:%M"),
            comment.text
        );
    }
    Ok(())
}

pub async fn run_comment(id: String, text: String) -> CliResult<()> {
    let context = CliContext::new()?;
    let user = context.require_user().await?;
    let issue = context.find_issue(&id).await?;

    match context
        .repository
        .add_comment(&issue, &user.display_name, &text, user.role)
        .await?
    {
        Some(updated) => {
            println!(
                "Comment #{} posted on {}",
                updated.comments.len(),
                updated.id
            );
            Ok(())
        }
        None => Err(CliError::new(
            format!("Issue {id} no longer exists"),
            EXIT_WARNING,
        )),
    }
}

pub async fn run_upvote(id: String) -> CliResult<()> {
    let context = CliContext::new()?;
    let issue = context.find_issue(&id).await?;

    match context.repository.upvote(&issue).await? {
        Some(updated) => {
            println!("Upvoted {} ({} votes)", updated.id, updated.upvotes);
            Ok(())
        }
        None => Err(CliError::new(
            format!("Issue {id} no longer exists"),
            EXIT_WARNING,
        )),
    }
}

pub async fn run_set_status(id: String, status: String) -> CliResult<()> {
    let context = CliContext::new()?;
    let user = context.require_user().await?;
    let issue = context.find_issue(&id).await?;

    let status: Status = status.parse()?;
    match context.repository.set_status(&user, &issue, status).await? {
        Some(updated) => {
            println!("{} is now {}", updated.id, colorize_status(updated.status));
            if let Some(resolved_on) = updated.resolved_on {
                println!("Resolved on {}", resolved_on.format("%Y-%m-%d %H:%M UTC"));
            }
            Ok(())
        }
        None => Err(CliError::new(
            format!("Issue {id} no longer exists"),
            EXIT_WARNING,
        )),
    }
}
