//! Frequency table: label -> occurrence count

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

/// Label counts, stored in first-encountered order.
///
/// Display orderings are derived on demand: `ranked()` for the frequency
/// listing and `sorted_by_label()` for label-ordered charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for label in labels {
            let label = label.as_ref();
            match index.get(label) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(label.to_string(), entries.len());
                    entries.push(FrequencyEntry {
                        label: label.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self { entries }
    }

    /// Entries in first-encountered order
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (equals the number of rows counted)
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
    }

    /// Descending by count; equal counts keep first-encountered order
    pub fn ranked(&self) -> Vec<&FrequencyEntry> {
        let mut ranked: Vec<&FrequencyEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// Ascending by label
    pub fn sorted_by_label(&self) -> Vec<&FrequencyEntry> {
        let mut sorted: Vec<&FrequencyEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.label.cmp(&b.label));
        sorted
    }

    /// Highest count; ties go to the label encountered first
    pub fn mode(&self) -> Option<&FrequencyEntry> {
        let mut best: Option<&FrequencyEntry> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best
    }

    /// Entry whose count is nearest `value`, scanning in ranked order and
    /// keeping the first match on ties
    pub fn nearest(&self, value: f64) -> Option<&FrequencyEntry> {
        let mut best: Option<(&FrequencyEntry, f64)> = None;
        for entry in self.ranked() {
            let distance = (entry.count as f64 - value).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((entry, distance));
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Lookup map for annotating rows
    pub(crate) fn counts_by_label(&self) -> HashMap<&str, usize> {
        self.entries
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect()
    }
}
