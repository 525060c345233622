use crate::model::observation::ObservationTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub category: usize,
    pub value: f64,
}

/// Peak category per sample, indexed like `ObservationTable::samples`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakAssignment {
    pub peaks: Vec<Peak>,
}

/// 1-based rank of each sample within its peak group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMap {
    pub ranks: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSample {
    pub sample: usize,
    pub peak_category: usize,
    pub peak_value: f64,
    pub rank: u32,
    pub block: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub category: usize,
    pub start: usize,
    pub len: usize,
}

impl Block {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleOrdering {
    pub samples: Vec<OrderedSample>,
    pub blocks: Vec<Block>,
}

impl SampleOrdering {
    pub fn sample_names<'a>(&self, table: &'a ObservationTable) -> Vec<&'a str> {
        self.samples
            .iter()
            .map(|s| table.samples[s.sample].as_str())
            .collect()
    }

    /// Peak category per sample in input (table) order.
    pub fn peak_by_sample(&self) -> Vec<usize> {
        let mut out = vec![0usize; self.samples.len()];
        for s in &self.samples {
            if let Some(slot) = out.get_mut(s.sample) {
                *slot = s.peak_category;
            }
        }
        out
    }

    pub fn block_samples(&self, block: &Block) -> &[OrderedSample] {
        &self.samples[block.start..block.end()]
    }
}
