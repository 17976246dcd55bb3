//! Season-aligned sampling of influenza HA sequences.
//!
//! Loads a northern and a southern hemisphere corpus, buckets the
//! sequences by collection year and draws winter → summer → winter
//! composites as character strings or token batches for training a
//! sequence model.

#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
