use async_trait::async_trait;

use super::EmbeddingProvider;
use crate::error::{DocumentError, DocumentResult};

/// Deterministic local embedder based on signed feature hashing.
///
/// Each lowercase alphanumeric token is hashed into one of `dimension`
/// buckets, the top hash bit picks the sign, and the result is L2-normalised.
/// Identical text gives identical vectors, so an exact-text query has cosine
/// distance 0 to its document.
///
/// Text whose tokens cancel out, or that has none (`""`, `"!!!"`), is hashed
/// as a whole into a single bucket, so every vector has unit length.
#[derive(Debug, Clone, Copy)]
pub struct HashingProvider {
    dimension: usize,
}

impl HashingProvider {
    pub fn new(dimension: usize) -> DocumentResult<Self> {
        if dimension == 0 {
            return Err(DocumentError::Config(
                "embedding dimension must be greater than zero".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    /// CPU-bound part of [`EmbeddingProvider::embed`].
    pub fn embed_blocking(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokens(text) {
            let (bucket, sign) = self.bucket(fnv1a(token.as_bytes()));
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        } else {
            let (bucket, sign) = self.bucket(fnv1a(text.trim().as_bytes()));
            vector[bucket] = sign;
        }
        vector
    }

    fn bucket(&self, hash: u64) -> (usize, f32) {
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        ((hash % self.dimension as u64) as usize, sign)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingProvider {
    fn name(&self) -> &'static str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> DocumentResult<Vec<f32>> {
        let provider = *self;
        let text = text.to_owned();
        Ok(tokio::task::spawn_blocking(move || provider.embed_blocking(&text)).await?)
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// 64-bit FNV-1a, stable across platforms and compiler versions.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
        1.0 - a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>()
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(HashingProvider::new(0), Err(DocumentError::Config(_))));
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_same_text_same_vector() {
        let provider = HashingProvider::new(64).unwrap();
        assert_eq!(
            provider.embed_blocking("hello world"),
            provider.embed_blocking("Hello,   WORLD!")
        );
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let provider = HashingProvider::new(384).unwrap();
        let v = provider.embed_blocking("the quick brown fox jumps over the lazy dog");
        assert!((norm(&v) - 1.0).abs() < 1e-5);
        assert_eq!(v.len(), 384);
    }

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn test_text_without_tokens_is_unit_vector() {
        let provider = HashingProvider::new(8).unwrap();

        for text in ["", "   \n", "!!! ??? ---"] {
            let v = provider.embed_blocking(text);
            assert!((norm(&v) - 1.0).abs() < 1e-6, "{:?} -> {:?}", text, v);
            assert!(cosine_distance(&v, &v).abs() < 1e-6);
            assert!(v.iter().all(|x| x.is_finite()));
        }
        assert_eq!(provider.embed_blocking(""), provider.embed_blocking("  \n"));
    }

    #[test]
    fn test_exact_text_is_nearest_even_without_tokens() {
        let provider = HashingProvider::new(384).unwrap();
        let empty = provider.embed_blocking("");
        let text = provider.embed_blocking("hello world");

        assert!(cosine_distance(&empty, &empty) < cosine_distance(&empty, &text));
        assert!(cosine_distance(&text, &text) < cosine_distance(&text, &empty));
    }

    #[test]
    fn test_shared_tokens_are_closer() {
        let provider = HashingProvider::new(384).unwrap();
        let query = provider.embed_blocking("redis vector search");
        let related = provider.embed_blocking("vector search with redis and hnsw");
        let unrelated = provider.embed_blocking("baking sourdough bread at home");

        assert!(cosine_distance(&query, &related) < cosine_distance(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_async_embed_matches_blocking() {
        let provider = HashingProvider::new(32).unwrap();
        let v = provider.embed("hello world").await.unwrap();
        assert_eq!(v, provider.embed_blocking("hello world"));
        assert_eq!(provider.name(), "hashing");
        assert_eq!(provider.dimension(), 32);
    }
}
