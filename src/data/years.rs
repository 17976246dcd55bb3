// ============================================================
// Layer 4 — Train/Validation Year Partition
// ============================================================
// Splits the years of the north corpus into training and
// validation years.
//
//   training   = all years − requested validation years
//   validation = all years ∩ requested validation years
//
// Boundary years are then dropped because a season pattern
// pivoting on them cannot be completed:
//   - the earliest training year has no previous year to draw
//     the preceding winter's October–December records from
//   - the latest validation year has no following year for
//     the closing winter
//
// Example: years 2010..=2018, validation [2016, 2017]
//   training   = [2011, 2012, 2013, 2014, 2015, 2018]
//   validation = [2016]
//
// Unlike a shuffled split, this is a split over TIME, so the
// model is validated on seasons it has never seen.
//
// Reference: Rust Book §8 (Vectors)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::SamplerError;

/// Which side of the partition to sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearGroup {
    Training,
    Validation,
}

/// Disjoint, ascending training and validation years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPartition {
    training:   Vec<i32>,
    validation: Vec<i32>,
}

impl YearPartition {
    /// Partition `all_years` given the requested validation years.
    ///
    /// # Errors
    /// Configuration error if `all_years` is empty: the corpora
    /// have not been loaded, or nothing survived parsing.
    pub fn new(all_years: &[i32], validation: &[i32]) -> Result<Self, SamplerError> {
        if all_years.is_empty() {
            return Err(SamplerError::configuration(
                "no corpus years available; load the corpora before setting validation years",
            ));
        }

        let all:       BTreeSet<i32> = all_years.iter().copied().collect();
        let requested: BTreeSet<i32> = validation.iter().copied().collect();

        // BTreeSet iteration is already ascending
        let mut training:   Vec<i32> = all.difference(&requested).copied().collect();
        let mut validation: Vec<i32> = all.intersection(&requested).copied().collect();

        if !training.is_empty() {
            training.remove(0);
        }
        validation.pop();

        tracing::debug!(
            "Year partition: training {:?}, validation {:?}",
            training,
            validation
        );

        Ok(Self { training, validation })
    }

    /// Training years, ascending
    pub fn training(&self) -> &[i32] {
        &self.training
    }

    /// Validation years, ascending
    pub fn validation(&self) -> &[i32] {
        &self.validation
    }

    /// Years of the requested group
    pub fn years(&self, group: YearGroup) -> &[i32] {
        match group {
            YearGroup::Training   => &self.training,
            YearGroup::Validation => &self.validation,
        }
    }
}
