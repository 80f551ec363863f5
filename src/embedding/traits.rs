// Embedder trait — the swap-ready abstraction.
//
// The classifier and the network builder depend only on this contract,
// never on model internals: model choice, weight loading and device
// placement are configuration. Tests substitute a deterministic stub.

use anyhow::Result;

/// Maps text to fixed-dimensionality vectors. Must be deterministic for
/// a fixed model and input — batch and one-at-a-time calls agree.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per text, same order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        vectors
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Embedder returned no vector"))
    }
}
