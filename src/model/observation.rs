use std::collections::HashMap;

/// One measurement of a sample, with the category interned to its table index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub category: usize,
    pub value: f64,
}

/// Composition table keyed by dense sample/category indices.
///
/// Samples and categories keep their first-seen order; each sample's entries
/// keep input order. Both orders feed tie-breaking downstream.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    pub samples: Vec<String>,
    pub categories: Vec<String>,
    pub entries: Vec<Vec<Entry>>,
    sample_index: HashMap<String, usize>,
    category_index: HashMap<String, usize>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: &str) -> usize {
        if let Some(&idx) = self.sample_index.get(sample) {
            return idx;
        }
        let idx = self.samples.len();
        self.samples.push(sample.to_string());
        self.entries.push(Vec::new());
        self.sample_index.insert(sample.to_string(), idx);
        idx
    }

    pub fn add_category(&mut self, category: &str) -> usize {
        if let Some(&idx) = self.category_index.get(category) {
            return idx;
        }
        let idx = self.categories.len();
        self.categories.push(category.to_string());
        self.category_index.insert(category.to_string(), idx);
        idx
    }

    pub fn push(&mut self, sample: &str, category: &str, value: f64) {
        let s = self.add_sample(sample);
        let c = self.add_category(category);
        self.entries[s].push(Entry { category: c, value });
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn n_observations(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.n_observations() == 0
    }

    pub fn category_id(&self, name: &str) -> Option<usize> {
        self.category_index.get(name).copied()
    }

    /// First value recorded for `(sample, category)`.
    pub fn value(&self, sample: usize, category: usize) -> Option<f64> {
        self.entries
            .get(sample)?
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.value)
    }

    pub fn total(&self, sample: usize) -> f64 {
        self.entries
            .get(sample)
            .map(|entries| entries.iter().map(|e| e.value).sum())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/observation.rs"]
mod tests;
