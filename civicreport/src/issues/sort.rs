//! Listing order for display
//!
//! Deterministic comparator: open work first (status rank ascending), most
//! recent first within a rank. Recomputed on every display pass and never
//! persisted; the stored collection stays in storage order.

use crate::issues::Issue;

/// Sort issues in place for display: status rank ascending (Pending,
/// In Progress, Resolved), then `reported_on` descending. The sort is
/// stable, so equal-key issues keep their storage order.
pub fn sort_for_display(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| b.reported_on.cmp(&a.reported_on))
    });
}
