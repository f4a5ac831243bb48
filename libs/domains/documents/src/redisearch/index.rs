//! Search module command arguments for the document index.

use super::codec::embedding_to_bytes;
use crate::models::IndexConfig;

pub const VECTOR_FIELD: &str = "embedding";
pub const CONTENT_FIELD: &str = "content";
pub const SCORE_ALIAS: &str = "score";
const QUERY_PARAM: &str = "vec";

/// Arguments following `FT.CREATE`:
///
/// ```text
/// <name> ON HASH [PREFIX 1 <prefix>]
///   SCHEMA embedding VECTOR HNSW <n> TYPE FLOAT32 DIM <d> DISTANCE_METRIC <m>
///   [M <m>] [EF_CONSTRUCTION <ef>]
/// ```
pub fn create_index_args(config: &IndexConfig) -> Vec<String> {
    let mut args = vec![config.name.clone(), "ON".into(), "HASH".into()];

    if !config.key_prefix.is_empty() {
        args.extend(["PREFIX".into(), "1".into(), config.key_prefix.clone()]);
    }

    let mut vector_params = vec![
        "TYPE".to_string(),
        "FLOAT32".to_string(),
        "DIM".to_string(),
        config.dimension.to_string(),
        "DISTANCE_METRIC".to_string(),
        config.distance.as_str().to_string(),
    ];
    if let Some(m) = config.hnsw.m {
        vector_params.extend(["M".to_string(), m.to_string()]);
    }
    if let Some(ef) = config.hnsw.ef_construction {
        vector_params.extend(["EF_CONSTRUCTION".to_string(), ef.to_string()]);
    }

    args.extend([
        "SCHEMA".into(),
        VECTOR_FIELD.into(),
        "VECTOR".into(),
        "HNSW".into(),
        vector_params.len().to_string(),
    ]);
    args.extend(vector_params);
    args
}

/// KNN query string binding the vector parameter and exposing the distance.
pub fn knn_query(k: usize) -> String {
    format!(
        "*=>[KNN {} @{} ${} AS {}]",
        k, VECTOR_FIELD, QUERY_PARAM, SCORE_ALIAS
    )
}

/// Arguments following `FT.SEARCH`, ranked by ascending distance.
pub fn search_args(index: &str, embedding: &[f32], k: usize) -> Vec<Vec<u8>> {
    let text = |s: &str| s.as_bytes().to_vec();

    vec![
        text(index),
        text(&knn_query(k)),
        text("PARAMS"),
        text("2"),
        text(QUERY_PARAM),
        embedding_to_bytes(embedding),
        text("SORTBY"),
        text(SCORE_ALIAS),
        text("ASC"),
        text("RETURN"),
        text("2"),
        text(CONTENT_FIELD),
        text(SCORE_ALIAS),
        text("LIMIT"),
        text("0"),
        text(&k.to_string()),
        text("DIALECT"),
        text("2"),
    ]
}
