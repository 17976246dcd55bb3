// ============================================================
// Layer 6 — Config Store
// ============================================================
// Reads and writes SamplerConfig as JSON.
//
// Example file:
//   {
//     "expected_len": 566,
//     "symbols": { "start": "$", "end": "%", "delim0": "&",
//                  "delim1": "@", "pad": "_" },
//     "windows": {
//       "winter": { "upper": 5, "lower": 10 },
//       "summer": { "lower": 5, "upper": 10 },
//       "summer_rule": "month_band"
//     },
//     "validation_years": [2016, 2017]
//   }
//
// Missing fields fall back to SamplerConfig::default(), so a
// file only has to list what it changes.
//
// Reference: serde_json crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::seasonal_corpus::SamplerConfig;

/// Load a SamplerConfig from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<SamplerConfig> {
    let path = path.as_ref();

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;

    tracing::debug!("Loaded sampler config from '{}'", path.display());
    Ok(cfg)
}

/// Render a SamplerConfig as pretty JSON (the `config` CLI command prints this).
pub fn config_to_json(cfg: &SamplerConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(cfg)?)
}
