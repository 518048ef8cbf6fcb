//! Fixed-label histograms for dashboard charts.
//!
//! A grouped `COUNT(*)` query only returns labels that occur. Charts need every
//! canonical bucket, in display order, even at zero; [`Histogram::build`] fills
//! the gaps and drops anything outside the taxonomy.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::label::{normalize, LabelCount};

/// Which fixed label set a histogram is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    /// Red / Amber / Green risk classification.
    Rag,
    TaskPriority,
    ProjectStatus,
}

impl Taxonomy {
    /// Canonical labels in display order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Rag => &["Red", "Amber", "Green"],
            Self::TaskPriority => &["Critical", "High", "Medium", "Low"],
            Self::ProjectStatus => &["Planning", "Active", "On Hold", "Completed"],
        }
    }
}

/// Label -> count over a complete taxonomy. Serializes as an ordered JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    buckets: Vec<(&'static str, i64)>,
}

impl Histogram {
    /// Every label present, every count zero.
    pub fn empty(taxonomy: Taxonomy) -> Self {
        Self {
            buckets: taxonomy.labels().iter().map(|label| (*label, 0)).collect(),
        }
    }

    pub fn build(taxonomy: Taxonomy, raw: &[LabelCount]) -> Self {
        let mut histogram = Self::empty(taxonomy);
        for row in raw {
            let Some(label) = row.label.as_deref() else {
                continue;
            };
            let key = normalize(label);
            match histogram
                .buckets
                .iter_mut()
                .find(|(canonical, _)| normalize(canonical) == key)
            {
                Some((_, count)) => *count += row.count.max(0),
                None => {
                    tracing::debug!(?taxonomy, label, count = row.count, "Ignoring label outside taxonomy")
                }
            }
        }
        histogram
    }

    /// Count for a label (matched leniently); 0 when the label is not canonical.
    pub fn get(&self, label: &str) -> i64 {
        let key = normalize(label);
        self.buckets
            .iter()
            .find(|(canonical, _)| normalize(canonical) == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.buckets.iter().copied()
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (label, count) in &self.buckets {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}
