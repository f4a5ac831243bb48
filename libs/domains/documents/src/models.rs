use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Vector distance metric supported by the Redis search module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistanceMetric {
    /// 1 - cosine similarity, 0 for identical direction
    #[default]
    Cosine,
    /// Euclidean distance
    L2,
    /// Inner product
    Ip,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "COSINE",
            Self::L2 => "L2",
            Self::Ip => "IP",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COSINE" => Ok(Self::Cosine),
            "L2" => Ok(Self::L2),
            "IP" => Ok(Self::Ip),
            other => Err(format!(
                "unknown distance metric '{}', expected COSINE, L2 or IP",
                other
            )),
        }
    }
}

/// HNSW build parameters; `None` leaves the server default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HnswConfig {
    pub m: Option<u32>,
    pub ef_construction: Option<u32>,
}

/// Definition of the vector index over document hashes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IndexConfig {
    pub name: String,
    pub dimension: usize,
    pub distance: DistanceMetric,
    /// Key prefix for document hashes; empty indexes every hash in the keyspace
    pub key_prefix: String,
    pub hnsw: HnswConfig,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
            distance: DistanceMetric::default(),
            key_prefix: String::new(),
            hnsw: HnswConfig::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    pub fn with_hnsw(mut self, hnsw: HnswConfig) -> Self {
        self.hnsw = hnsw;
        self
    }

    /// Hash key under which a document with this filename is stored.
    pub fn document_key(&self, filename: &str) -> String {
        format!("{}{}", self.key_prefix, filename)
    }
}

/// What `FT.INFO` reports about an existing index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IndexInfo {
    pub name: String,
    pub num_docs: Option<u64>,
    /// Only reported by search module versions that list vector attributes
    pub dimension: Option<usize>,
    pub algorithm: Option<String>,
    pub distance_metric: Option<String>,
}

/// Outcome of the startup index check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Ready,
    Created,
    Missing,
}

/// One nearest-neighbour hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchMatch {
    /// Stored document content
    #[schema(example = "hello world")]
    pub document: String,
    /// Vector distance to the query; lower is closer
    #[schema(example = 0.0)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// Up to K matches, closest first
    pub matches: Vec<SearchMatch>,
}

/// JSON body accepted by search when no `query` parameter is given
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[schema(example = "hello world")]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "Document uploaded successfully")]
    pub message: String,
}

impl UploadResponse {
    pub fn success() -> Self {
        Self {
            message: "Document uploaded successfully".to_string(),
        }
    }
}
