//! Per-year and per-mood aggregates over a [`Collection`].

use crate::collection::Collection;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStats {
    pub year: String,
    pub entries: usize,
    pub words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCount {
    pub mood: String,
    pub count: usize,
}

impl Collection {
    /// One row per year, oldest year first.
    pub fn year_stats(&self) -> Vec<YearStats> {
        self.by_year
            .iter()
            .map(|(year, entries)| YearStats {
                year: year.clone(),
                entries: entries.len(),
                words: entries.iter().map(|e| e.word_count).sum(),
            })
            .collect()
    }

    /// How often each mood label occurs, most frequent first (ties by label).
    /// Entries without a mood are not counted.
    pub fn mood_counts(&self) -> Vec<MoodCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for mood in self.entries.iter().filter_map(|e| e.mood.as_deref()) {
            *counts.entry(mood).or_default() += 1;
        }

        let mut counts: Vec<MoodCount> = counts
            .into_iter()
            .map(|(mood, count)| MoodCount {
                mood: mood.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));
        counts
    }
}
