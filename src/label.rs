//! Menu labels: branch name, alignment padding and a relative-time annotation
//!
//! A label is `<name><TAB><padding>(<annotation>)`. The tab is the same field
//! delimiter git's branch listing uses, so no enumerated branch name can
//! contain it and [`extract_name`] is an exact inverse of [`build_labels`].

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::git::{BranchEntry, FIELD_DELIMITER};
use crate::recency::format_relative;

/// Default number of spaces between the longest name and its annotation
pub const DEFAULT_GUTTER: usize = 4;

/// Build one aligned label per branch, in the same order
///
/// Every annotation starts `gutter` columns after the end of the longest name.
/// Names are measured in terminal columns, so wide characters count twice.
/// A `gutter` of zero is raised to one.
#[must_use]
pub fn build_labels(branches: &[BranchEntry], now: DateTime<Utc>, gutter: usize) -> Vec<String> {
    let gutter = gutter.max(1);
    let widest = branches
        .iter()
        .map(|b| display_width(&b.name))
        .max()
        .unwrap_or(0);

    branches
        .iter()
        .map(|branch| {
            let padding = " ".repeat(widest - display_width(&branch.name) + gutter);
            let annotation = format_relative(now, branch.last_commit_time);
            format!("{}{FIELD_DELIMITER}{padding}({annotation})", branch.name)
        })
        .collect()
}

/// Recover the branch name from a label built by [`build_labels`]
///
/// Text without a delimiter is returned unchanged.
#[must_use]
pub fn extract_name(label: &str) -> &str {
    split(label).0
}

/// Split a label into its name and the padded annotation
#[must_use]
pub fn split(label: &str) -> (&str, &str) {
    label.split_once(FIELD_DELIMITER).unwrap_or((label, ""))
}

/// Label with the delimiter replaced by a space, for plain-text output
#[must_use]
pub fn to_plain(label: &str) -> String {
    let (name, rest) = split(label);
    if rest.is_empty() {
        name.to_string()
    } else {
        format!("{name} {rest}")
    }
}

fn display_width(name: &str) -> usize {
    name.width()
}
