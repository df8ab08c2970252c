//! Per-symbol persistence of trained sequence models.
//!
//! Models are stored as one JSON artifact per symbol under the configured
//! data directory. Loads are best-effort: any read or parse failure is logged
//! and treated as a cache miss so the caller falls back to a full retrain.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use super::network::SequenceModel;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("model store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("model serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("models"),
        }
    }

    fn model_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol.to_uppercase()))
    }

    pub fn exists(&self, symbol: &str) -> bool {
        self.model_path(symbol).is_file()
    }

    pub fn save(&self, symbol: &str, model: &SequenceModel) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_string(model)?;
        fs::write(self.model_path(symbol), payload)?;
        Ok(())
    }

    /// Load a previously trained model, or `None` when missing or unreadable
    pub fn load(&self, symbol: &str) -> Option<SequenceModel> {
        let path = self.model_path(symbol);
        if !path.is_file() {
            return None;
        }
        let payload = match fs::read_to_string(&path) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(symbol, %error, "failed to read cached model, retraining");
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(model) => Some(model),
            Err(error) => {
                warn!(symbol, %error, "cached model is corrupted, retraining");
                None
            }
        }
    }
}
