//! Deterministic hashed-term fallback provider.
//!
//! Maps unigrams and bigrams into fixed-dimension buckets weighted by term
//! frequency. Not semantically rich, but deterministic, dependency-free, and
//! always available — the terminal rung of the provider chain.

use std::collections::HashMap;

use trellis_core::errors::IndexError;
use trellis_core::traits::IEmbeddingProvider;

pub const PROVIDER_NAME: &str = "hashed-terms";

/// Hashed term-vector provider.
pub struct HashedTermFallback {
    dimensions: usize,
}

impl HashedTermFallback {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a hash of a term into a bucket index.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lowercase alphanumeric tokens, dropping single characters.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn term_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        // Term frequencies over unigrams, plus bigrams at half weight so
        // adjacent-word phrases ("air zoom") survive bucket collisions.
        let mut tf: HashMap<String, f32> = HashMap::new();
        for token in &tokens {
            *tf.entry(token.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            *tf.entry(format!("{} {}", pair[0], pair[1])).or_default() += 0.5;
        }

        let total = tokens.len() as f32;
        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            // Longer terms carry more signal than near-stopwords.
            let weight = (count / total) * (1.0 + (term.len() as f32).ln());
            vector[Self::bucket(term, self.dimensions)] += weight;
        }

        // L2 normalize so cosine reduces to a dot product.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl IEmbeddingProvider for HashedTermFallback {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        Ok(self.term_vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_a_zero_vector() {
        let p = HashedTermFallback::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_unit_norm() {
        let p = HashedTermFallback::new(256);
        let v = p.embed("lightweight trail running shoe").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic_across_calls() {
        let p = HashedTermFallback::new(256);
        assert_eq!(
            p.embed("stability trainer").unwrap(),
            p.embed("stability trainer").unwrap()
        );
    }

    #[test]
    fn overlapping_texts_score_higher_than_disjoint() {
        let p = HashedTermFallback::new(256);
        let a = p.embed("responsive running cushioning").unwrap();
        let b = p.embed("responsive running foam").unwrap();
        let c = p.embed("leather dress oxford").unwrap();

        let cos = |x: &[f32], y: &[f32]| -> f32 { x.iter().zip(y).map(|(a, b)| a * b).sum() };
        assert!(cos(&a, &b) > cos(&a, &c));
    }

    #[test]
    fn batch_matches_individual() {
        let p = HashedTermFallback::new(128);
        let texts = vec!["court shoe".to_string(), "trail boot".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }
}
