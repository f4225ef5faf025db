//! Motor de redacción: decide entre entregar el original o una copia limpia.

mod engine;
mod verify;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use engine::{reencode_jpeg, redact};
pub use verify::verify_metadata_clean;

/// Prefijo que reciben los archivos regenerados sin metadata.
pub const CLEANED_PREFIX: &str = "cleaned_";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactionError {
    #[error("{0}")]
    ReencodeFailed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionOptions {
    pub jpeg_quality: u8,
    pub verify_output: bool,
}

impl Default for RedactionOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: crate::config::DEFAULT_JPEG_QUALITY,
            verify_output: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedactionOutcome {
    Unchanged(Vec<u8>),
    Stripped(Vec<u8>),
}

impl RedactionOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            RedactionOutcome::Unchanged(bytes) | RedactionOutcome::Stripped(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RedactionOutcome::Unchanged(bytes) | RedactionOutcome::Stripped(bytes) => bytes,
        }
    }

    pub fn is_stripped(&self) -> bool {
        matches!(self, RedactionOutcome::Stripped(_))
    }
}

/// Nombre con el que se guarda la salida: el original si no cambió, o con el
/// prefijo `cleaned_` si se regeneró.
pub fn output_file_name(original: &str, outcome: &RedactionOutcome) -> String {
    match outcome {
        RedactionOutcome::Unchanged(_) => original.to_string(),
        RedactionOutcome::Stripped(_) => format!("{CLEANED_PREFIX}{original}"),
    }
}
