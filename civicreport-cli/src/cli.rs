use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "civicreport")]
#[command(version)]
#[command(about = "Report and track community infrastructure issues")]
#[command(long_about = "
civicreport tracks community-reported infrastructure issues (roads, waste,
power, water, security) through a Pending / In Progress / Resolved workflow.
Reports, comments, and upvotes are stored locally under ./.civicreport.

Example usage:
  civicreport login citizen                 # Start a session
  civicreport report --title 'Pothole' --category Roads --description '...'
  civicreport list                          # Sorted issue tracker
  civicreport upvote RPT-1704067200000      # Support a report
  civicreport set-status RPT-... resolved   # Admin: triage a report
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in as a directory user
    #[command(long_about = "
Logs in against the fixed credential directory and persists the session.
If --password is omitted you will be prompted without echo.

Examples:
  civicreport login citizen
  civicreport login admin --password password
")]
    Login {
        /// Username from the credential directory
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the current session
    Logout,
    /// Show the current session user
    Whoami,
    /// Submit a new community report
    #[command(long_about = "
Submits a new issue report. The report starts Pending with no upvotes or
comments; the reporter name comes from the current session, or 'Anonymous'
when logged out.

Categories: Roads, 'Waste Disposal', 'Power Outages', 'Water Supply',
Security, Other.

Example:
  civicreport report \\
      --title 'Blocked drainage at school road' \\
      --category Roads \\
      --description 'Standing water after every rainfall.' \\
      --lat 10.518 --lng 7.433
")]
    Report {
        /// Title of the issue
        #[arg(long)]
        title: String,

        /// Category from the fixed enumeration
        #[arg(long)]
        category: String,

        /// Detailed description
        #[arg(long)]
        description: String,

        /// Latitude of the issue location
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Longitude of the issue location
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Free-form address text
        #[arg(long)]
        address: Option<String>,

        /// Link to a supporting photo or video
        #[arg(long)]
        media_url: Option<String>,
    },
    /// List all issues, open work first
    #[command(long_about = "
Lists all tracked issues sorted for display: Pending first, then
In Progress, then Resolved, most recent first within each status.

Examples:
  civicreport list
  civicreport list --json    # machine-readable output
")]
    List {
        /// Emit the sorted collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one issue in full, including its discussion thread
    Show {
        /// Issue id (e.g. RPT-1704067200000)
        id: String,
    },
    /// Comment on an issue
    Comment {
        /// Issue id
        id: String,

        /// Comment text
        text: String,
    },
    /// Upvote an issue
    Upvote {
        /// Issue id
        id: String,
    },
    /// Change an issue's status (admin only)
    #[command(long_about = "
Moves an issue to a new status. Requires an admin session; any status may
be set, including moving a Resolved issue back to Pending. Resolving stamps
the resolution time; reopening clears it.

Statuses: pending, in-progress, resolved.

Example:
  civicreport set-status RPT-1704067200000 in-progress
")]
    SetStatus {
        /// Issue id
        id: String,

        /// Target status (pending, in-progress, resolved)
        status: String,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
