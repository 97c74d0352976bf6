//! Keyword parameter decoding
//!
//! Params arrive as JSON. Vertex-level and edge-level params (`types`,
//! `weights`) accept either the name of an attribute carried by the graph or
//! an inline array with one entry per element.

use serde_json::Value as Json;

use crate::shared::models::{ElementKind, IndexedGraph, Value};
use crate::shared::ports::{BackendError, Params};

type ParamResult<T> = Result<T, BackendError>;

pub(crate) fn require<'a>(params: &'a Params, name: &str) -> ParamResult<&'a Json> {
    params
        .get(name)
        .ok_or_else(|| BackendError::MissingParameter(name.to_string()))
}

pub(crate) fn f64_or(params: &Params, name: &str, default: f64) -> ParamResult<f64> {
    match params.get(name) {
        None | Some(Json::Null) => Ok(default),
        Some(value) => value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| BackendError::invalid(name, format!("expected a number, got {}", value))),
    }
}

pub(crate) fn usize_opt(params: &Params, name: &str) -> ParamResult<Option<usize>> {
    match params.get(name) {
        None | Some(Json::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                BackendError::invalid(name, format!("expected a non-negative integer, got {}", value))
            }),
    }
}

pub(crate) fn usize_or(params: &Params, name: &str, default: usize) -> ParamResult<usize> {
    Ok(usize_opt(params, name)?.unwrap_or(default))
}

pub(crate) fn u64_opt(params: &Params, name: &str) -> ParamResult<Option<u64>> {
    match params.get(name) {
        None | Some(Json::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            BackendError::invalid(name, format!("expected a non-negative integer, got {}", value))
        }),
    }
}

pub(crate) fn str_or<'a>(params: &'a Params, name: &str, default: &'a str) -> ParamResult<&'a str> {
    match params.get(name) {
        None | Some(Json::Null) => Ok(default),
        Some(value) => value
            .as_str()
            .ok_or_else(|| BackendError::invalid(name, format!("expected a string, got {}", value))),
    }
}

/// Boolean flag that also accepts `0`/`1` and `"false"`/`"true"`
pub(crate) fn flag_or(params: &Params, name: &str, default: bool) -> ParamResult<bool> {
    match params.get(name) {
        None | Some(Json::Null) => Ok(default),
        Some(value) => json_bool(value)
            .ok_or_else(|| BackendError::invalid(name, format!("expected a boolean, got {}", value))),
    }
}

fn json_bool(value: &Json) -> Option<bool> {
    match value {
        Json::Bool(b) => Some(*b),
        Json::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Json::String(s) => match s.as_str() {
            "false" | "0" => Some(false),
            "true" | "1" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Per-vertex boolean partition (`types`)
pub(crate) fn vertex_types(graph: &IndexedGraph, params: &Params, name: &str) -> ParamResult<Vec<bool>> {
    let raw = require(params, name)?;
    let types = match raw {
        Json::String(attr) => {
            let column = graph
                .attribute(ElementKind::Vertex, attr)
                .ok_or_else(|| BackendError::invalid(name, format!("no vertex attribute '{}'", attr)))?;
            column
                .iter()
                .map(|value| match value {
                    Value::Bool(b) => Some(*b),
                    Value::Int(0) => Some(false),
                    Value::Int(1) => Some(true),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    BackendError::invalid(name, format!("attribute '{}' is not a boolean partition", attr))
                })?
        }
        Json::Array(items) => items
            .iter()
            .map(json_bool)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| BackendError::invalid(name, "expected an array of booleans"))?,
        other => {
            return Err(BackendError::invalid(
                name,
                format!("expected an attribute name or an array, got {}", other),
            ))
        }
    };
    if types.len() != graph.vertex_count() {
        return Err(BackendError::invalid(
            name,
            format!("expected {} entries, got {}", graph.vertex_count(), types.len()),
        ));
    }
    Ok(types)
}

/// Per-edge weights (`weights`), `None` when not given
pub(crate) fn edge_weights(graph: &IndexedGraph, params: &Params) -> ParamResult<Option<Vec<f64>>> {
    const NAME: &str = "weights";
    let weights = match params.get(NAME) {
        None | Some(Json::Null) => return Ok(None),
        Some(Json::String(attr)) => {
            let column = graph
                .attribute(ElementKind::Edge, attr)
                .ok_or_else(|| BackendError::invalid(NAME, format!("no edge attribute '{}'", attr)))?;
            column
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    BackendError::invalid(NAME, format!("attribute '{}' has non-numeric values", attr))
                })?
        }
        Some(Json::Array(items)) => items
            .iter()
            .map(Json::as_f64)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| BackendError::invalid(NAME, "expected an array of numbers"))?,
        Some(other) => {
            return Err(BackendError::invalid(
                NAME,
                format!("expected an attribute name or an array, got {}", other),
            ))
        }
    };
    if weights.len() != graph.edge_count() {
        return Err(BackendError::invalid(
            NAME,
            format!("expected {} entries, got {}", graph.edge_count(), weights.len()),
        ));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(BackendError::invalid(NAME, "weights must be finite and non-negative"));
    }
    Ok(Some(weights))
}
