// Sentence embedder backed by a local ONNX model.
//
// Embeds text into 384-dimensional vectors with a multilingual MiniLM
// sentence transformer (the catalogue data is Spanish). Tokenized input
// is padded into batch tensors, run through the BERT encoder, and
// mean-pooled over the attention mask — matching the model's training.
//
// The model runs locally via ONNX: no API calls, deterministic for a
// fixed model file and input.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::Embedder;

/// Embedding dimension of the MiniLM family.
pub const EMBEDDING_DIM: usize = 384;

/// Local ONNX sentence embedder.
///
/// The session sits behind a Mutex — ort sessions take &mut for
/// inference. The call is synchronous; batching is a throughput
/// optimization, never a behavioral one.
pub struct OnnxEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxEmbedder {
    /// Load the embedding model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json`. Run `vitela
    /// download-model` first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Embedding model not found: {}\nRun `vitela download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Embedding tokenizer not found: {}\nRun `vitela download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!(
                    "Failed to load embedding model from {}",
                    model_path.display()
                )
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;

        debug!("Loaded sentence embedding model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

impl Embedder for OnnxEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // Tokenize all texts
        let encodings: Vec<_> = texts
            .iter()
            .map(|t| {
                self.tokenizer
                    .encode(t.as_str(), true)
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        if max_len == 0 {
            return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch_size]);
        }

        // Build padded input tensors. BERT uses:
        //   input_ids: token IDs (pad with 0)
        //   attention_mask: 1 for real tokens, 0 for padding
        //   token_type_ids: all zeros for single-sentence input
        let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut token_type_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

        for enc in &encodings {
            let ids = enc.get_ids();
            let mask = enc.get_attention_mask();
            let seq_len = ids.len();

            input_ids_flat.extend(ids.iter().map(|&id| id as i64));
            attention_mask_flat.extend(mask.iter().map(|&m| m as i64));
            token_type_ids_flat.extend(std::iter::repeat_n(0i64, seq_len));

            let pad_len = max_len - seq_len;
            input_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
            attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
            token_type_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
        }

        let shape = [batch_size as i64, max_len as i64];

        let input_ids_tensor = Tensor::from_array((shape, input_ids_flat))
            .context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat.clone()))
            .context("Failed to create attention_mask tensor")?;
        let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids_flat))
            .context("Failed to create token_type_ids tensor")?;

        // Run inference — output is last_hidden_state: [batch, seq_len, 384]
        let hidden_states = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor
                })
                .context("Embedding ONNX inference failed")?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract embedding output tensor")?;

            data.to_vec()
        };

        // Mean pooling: average token embeddings weighted by the
        // attention mask, so padding never contributes.
        let mut embeddings = Vec::with_capacity(batch_size);

        for i in 0..batch_size {
            let mut sum = vec![0.0_f64; EMBEDDING_DIM];
            let mut mask_sum = 0.0_f64;

            for j in 0..max_len {
                let mask_val = attention_mask_flat[i * max_len + j] as f64;
                if mask_val > 0.0 {
                    mask_sum += mask_val;
                    let offset = (i * max_len + j) * EMBEDDING_DIM;
                    for k in 0..EMBEDDING_DIM {
                        sum[k] += hidden_states[offset + k] as f64 * mask_val;
                    }
                }
            }

            if mask_sum > 0.0 {
                for val in &mut sum {
                    *val /= mask_sum;
                }
            }

            embeddings.push(sum);
        }

        debug!(
            batch_size = batch_size,
            dim = EMBEDDING_DIM,
            "Computed sentence embeddings"
        );

        Ok(embeddings)
    }
}
