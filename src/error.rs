//! Configuration errors
//!
//! The simulation itself never fails; only loading settings and levels does.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{set} rect #{index} must have a finite origin and positive extent")]
    MalformedRect { set: &'static str, index: usize },

    #[error("tuning value `{field}` is out of range: {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    #[error("enemy spawn #{index} has an empty patrol range ({left} >= {right})")]
    EmptyPatrol { index: usize, left: f32, right: f32 },

    #[error("enemy spawn #{index} must start with positive hp, got {hp}")]
    NonPositiveHp { index: usize, hp: i32 },
}
