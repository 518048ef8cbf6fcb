//! Grouped label counts and lenient label matching for TEXT status columns.

use serde::Serialize;
use sqlx::FromRow;

/// One row of a `SELECT <column> AS label, COUNT(*) AS count ... GROUP BY` query.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LabelCount {
    pub label: Option<String>,
    pub count: i64,
}

impl LabelCount {
    pub fn new(label: &str, count: i64) -> Self {
        Self {
            label: Some(label.to_string()),
            count,
        }
    }
}

/// Fold a label into its comparison key: lowercase ASCII alphanumerics only.
///
/// `"In Progress"`, `"in_progress"` and `"InProgress"` all become `"inprogress"`.
pub fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Count occurrences of each label in an iterator of raw labels.
pub fn tally<'a, I>(labels: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<LabelCount> = Vec::new();
    for label in labels {
        match counts
            .iter_mut()
            .find(|c| c.label.as_deref() == Some(label))
        {
            Some(existing) => existing.count += 1,
            None => counts.push(LabelCount::new(label, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_spaces_and_underscores() {
        assert_eq!(normalize("In Progress"), "inprogress");
        assert_eq!(normalize("in_progress"), "inprogress");
        assert_eq!(normalize("OnHold"), "onhold");
        assert_eq!(normalize("  RED "), "red");
    }

    #[test]
    fn tally_groups_identical_labels() {
        let counts = tally(["High", "Low", "High"]);
        assert_eq!(counts, vec![LabelCount::new("High", 2), LabelCount::new("Low", 1)]);
    }
}
