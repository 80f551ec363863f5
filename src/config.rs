use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::network::DEFAULT_SIMILARITY_THRESHOLD;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Command-line flags override whatever is loaded here.
pub struct Config {
    /// Directory containing the ONNX embedding model files
    pub model_dir: PathBuf,
    /// HuggingFace repo to download the embedding model from
    pub model_repo: String,
    /// Similarity threshold for network edges
    pub similarity_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables. Every field has a
    /// default, so loading never fails on a clean environment.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("VITELA_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::embedding::download::default_model_dir());

        let model_repo = env::var("VITELA_MODEL_REPO")
            .unwrap_or_else(|_| crate::embedding::download::DEFAULT_MODEL_REPO.to_string());

        let similarity_threshold = match env::var("VITELA_THRESHOLD") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("VITELA_THRESHOLD must be a number, got: {raw}")
            })?,
            Err(_) => DEFAULT_SIMILARITY_THRESHOLD,
        };

        Ok(Self {
            model_dir,
            model_repo,
            similarity_threshold,
        })
    }

    /// Check that the embedding model files exist.
    /// Call this before any operation that needs embeddings.
    pub fn require_embedder(&self) -> Result<()> {
        if !crate::embedding::download::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "Embedding model files not found in {}\n\
                 Run `vitela download-model` to download them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_env() {
        // Env vars may be set in the ambient test environment; only
        // assert what holds regardless.
        let config = Config::load().unwrap();
        assert!(!config.model_repo.is_empty());
        assert!(config.similarity_threshold > 0.0);
    }
}
