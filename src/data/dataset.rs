// ============================================================
// Layer 4 — Training Pair Dataset
// ============================================================
// Wraps the pairs of one sampled epoch in Burn's Dataset trait
// so an external training loop can feed them through a
// DataLoader.
//
// The seasonal sampler draws with replacement, so an "epoch"
// is simply a fixed number of freshly sampled pairs; a new
// PairDataset is built for every epoch.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use burn::data::dataset::Dataset;

use crate::data::batch::{TokenBatch, TrainingPair};

pub struct PairDataset {
    pairs: Vec<TrainingPair>,
}

impl PairDataset {
    pub fn new(pairs: Vec<TrainingPair>) -> Self { Self { pairs } }
}

impl From<TokenBatch> for PairDataset {
    fn from(batch: TokenBatch) -> Self {
        Self::new(batch.into_pairs())
    }
}

impl Dataset<TrainingPair> for PairDataset {
    fn get(&self, index: usize) -> Option<TrainingPair> {
        self.pairs.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }
}
