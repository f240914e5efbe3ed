// Embedding engine for note similarity
//
// Deterministic hash-projection vectors. No model download, no tokenizer:
// texts sharing vocabulary land near each other, which is all the note
// index needs to beat plain substring matching.

use anyhow::Result;

/// Trait seam so the note index can probe any embedding backend
pub trait EmbeddingEngine: Send + Sync {
    /// Generate an embedding vector for text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimension
    fn dimension(&self) -> usize;
}

/// Hash-projection embedding: each normalised token lights up a handful
/// of dimensions of a fixed-size vector.
pub struct HashEmbedding {
    dimension: usize,
}

impl HashEmbedding {
    pub fn new() -> Self {
        Self { dimension: 256 }
    }

    fn project(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut vector = vec![0.0; self.dimension];

        for word in text.split_whitespace() {
            let token: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if token.is_empty() {
                continue;
            }

            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let hash = hasher.finish();

            // Spread each token across four dimensions so collisions
            // between unrelated tokens stay partial
            for shift in 0..4 {
                let idx = ((hash >> (shift * 16)) & 0xffff) as usize % self.dimension;
                vector[idx] += 1.0;
            }
        }

        normalize(&mut vector);
        vector
    }
}

impl EmbeddingEngine for HashEmbedding {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.project(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for HashEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity between two embeddings (0.0 when shapes differ)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_dimension() {
        let engine = HashEmbedding::new();
        assert_eq!(engine.dimension(), 256);
        assert_eq!(engine.embed("hello world").unwrap().len(), 256);
    }

    #[test]
    fn test_embedding_is_unit_length() {
        let engine = HashEmbedding::new();
        let emb = engine.embed("study machine learning every day").unwrap();
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm: {}", norm);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let engine = HashEmbedding::new();
        let a = engine.embed("compiler design").unwrap();
        let b = engine.embed("compiler design").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embedding_ignores_case_and_punctuation() {
        let engine = HashEmbedding::new();
        let a = engine.embed("Machine Learning!").unwrap();
        let b = engine.embed("machine learning").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shared_vocabulary_beats_disjoint() {
        let engine = HashEmbedding::new();
        let query = engine.embed("study machine learning").unwrap();
        let related = engine.embed("machine learning improves from experience").unwrap();
        let unrelated = engine.embed("ancient roman aqueduct engineering").unwrap();
        assert!(
            cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated)
        );
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let engine = HashEmbedding::new();
        let emb = engine.embed("   ").unwrap();
        assert!(emb.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_cosine_similarity_mismatched_shapes() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
