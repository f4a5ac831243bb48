//! Conversions between domain values and Redis wire values.

use redis::Value;

use crate::error::{DocumentError, DocumentResult};
use crate::models::{IndexInfo, SearchMatch};

/// FLOAT32 little-endian blob, the layout the search module expects.
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Whether a Redis error means the named index does not exist.
///
/// Search module versions word this differently ("Unknown index name",
/// "no such index").
pub fn is_missing_index(err: &redis::RedisError) -> bool {
    let message = err.to_string().to_ascii_lowercase();
    message.contains("unknown index name") || message.contains("no such index")
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::BulkString(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::SimpleString(s) => Some(s.clone()),
        Value::VerbatimString { text, .. } => Some(text.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Double(d) => Some(d.to_string()),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Double(d) => Some(*d),
        Value::Int(i) => Some(*i as f64),
        other => as_string(other)?.trim().parse().ok(),
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Int(i) => u64::try_from(*i).ok(),
        Value::Double(d) if *d >= 0.0 => Some(*d as u64),
        other => {
            let s = as_string(other)?;
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|d| *d >= 0.0).map(|d| d as u64))
        }
    }
}

/// Key/value pairs from a flat RESP2 array or a RESP3 map.
fn pairs(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Array(items) => items
            .chunks_exact(2)
            .filter_map(|pair| Some((as_string(&pair[0])?, &pair[1])))
            .collect(),
        Value::Map(entries) => entries
            .iter()
            .filter_map(|(k, v)| Some((as_string(k)?, v)))
            .collect(),
        _ => Vec::new(),
    }
}

fn lookup<'a>(fields: &[(String, &'a Value)], key: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}

fn match_from_fields(fields: &[(String, &Value)]) -> DocumentResult<SearchMatch> {
    let document = lookup(fields, "content")
        .and_then(as_string)
        .unwrap_or_default();
    let score = lookup(fields, "score")
        .and_then(as_f64)
        .ok_or_else(|| DocumentError::Store("search result without a score".to_string()))?;
    if !score.is_finite() {
        return Err(DocumentError::Store(format!(
            "search result for '{}' has a non-numeric score",
            document
        )));
    }

    Ok(SearchMatch { document, score })
}

/// Parse an `FT.SEARCH ... RETURN 2 content score` reply.
///
/// RESP2: `[total, key, [field, value, ...], key, [...], ...]`.
/// RESP3: `{total_results, results: [{id, extra_attributes: {...}}, ...]}`.
pub fn parse_search_reply(reply: &Value) -> DocumentResult<Vec<SearchMatch>> {
    match reply {
        Value::Array(items) => {
            let Some((_total, rest)) = items.split_first() else {
                return Ok(Vec::new());
            };
            rest.chunks(2)
                .map(|chunk| match chunk {
                    [_key, fields] => match_from_fields(&pairs(fields)),
                    _ => Err(DocumentError::Store(
                        "search reply has a key without fields".to_string(),
                    )),
                })
                .collect()
        }
        Value::Map(_) => {
            let top = pairs(reply);
            let Some(Value::Array(results)) = lookup(&top, "results") else {
                return Ok(Vec::new());
            };
            results
                .iter()
                .map(|result| {
                    let entry = pairs(result);
                    let attributes = lookup(&entry, "extra_attributes")
                        .map(pairs)
                        .unwrap_or_default();
                    match_from_fields(&attributes)
                })
                .collect()
        }
        other => Err(DocumentError::Store(format!(
            "unexpected search reply: {:?}",
            other
        ))),
    }
}

/// Extract what the service needs from an `FT.INFO` reply.
///
/// The vector dimension is read from the attribute whose identifier or alias
/// is `vector_field`; older module versions omit it.
pub fn parse_index_info(name: &str, vector_field: &str, reply: &Value) -> IndexInfo {
    let top = pairs(reply);
    let mut info = IndexInfo {
        name: name.to_string(),
        num_docs: lookup(&top, "num_docs").and_then(as_u64),
        ..IndexInfo::default()
    };

    let attributes = match lookup(&top, "attributes") {
        Some(Value::Array(attrs)) => attrs.as_slice(),
        _ => &[],
    };

    for attribute in attributes {
        let fields = pairs(attribute);
        let names_field = ["identifier", "attribute"].iter().any(|key| {
            lookup(&fields, key)
                .and_then(as_string)
                .is_some_and(|v| v == vector_field)
        });
        if !names_field {
            continue;
        }

        info.dimension = lookup(&fields, "dim")
            .and_then(as_u64)
            .map(|d| d as usize);
        info.algorithm = lookup(&fields, "algorithm").and_then(as_string);
        info.distance_metric = lookup(&fields, "distance_metric").and_then(as_string);
        break;
    }

    info
}
