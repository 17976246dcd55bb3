// ============================================================
// Layer 4 — Training Pair Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<TrainingPair>
// into two integer tensors the training loop can consume.
//
// How batching works here:
//   Input:  Vec of N pairs, each row of length L
//   Output: PairBatch with tensors of shape [N, L]
//
//   Rows are flattened in order and reshaped:
//   [r1_t1, r1_t2, ..., r1_tL, r2_t1, ..., rN_tL] → [N, L]
//
// All rows already have the same length because the batch
// assembler pads them to slice_len, so no dynamic padding is
// needed here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::batch::TrainingPair;

// ─── PairBatch ────────────────────────────────────────────────────────────────
/// Inputs and next-token targets, both shaped [batch_size, slice_len].
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// Token ids fed to the model
    pub inputs: Tensor<B, 2, Int>,

    /// Token ids the model should predict at each position
    pub targets: Tensor<B, 2, Int>,
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PairBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn stack(&self, rows: Vec<&[u32]>) -> Tensor<B, 2, Int> {
        let batch_size = rows.len();
        let seq_len    = rows.first().map_or(0, |r| r.len());

        // Burn converts to the backend int element on upload
        let flat: Vec<i32> = rows
            .iter()
            .flat_map(|r| r.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 2, Int>::from_data(TensorData::new(flat, [batch_size, seq_len]), &self.device)
    }
}

impl<B: Backend> Batcher<TrainingPair, PairBatch<B>> for PairBatcher<B> {
    fn batch(&self, items: Vec<TrainingPair>) -> PairBatch<B> {
        let inputs  = self.stack(items.iter().map(|p| p.input.as_slice()).collect());
        let targets = self.stack(items.iter().map(|p| p.target.as_slice()).collect());

        PairBatch { inputs, targets }
    }
}
