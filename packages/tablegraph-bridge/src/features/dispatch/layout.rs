//! "layout" dispatch: position vertices, leave edges untouched.

use tracing::info;

use super::compute::{prepare_params, resolve_directed, unexpected};
use super::registry::AlgorithmRegistry;
use super::LayoutOptions;
use crate::config::{AdapterConfig, ConfigError};
use crate::errors::{BridgeError, Result, SchemaError};
use crate::features::conversion::{from_indexed, to_indexed, FromIndexedOptions};
use crate::shared::models::{Bindings, Column, TabularGraph};
use crate::shared::ports::{AlgorithmBackend, AlgorithmOutput, BackendError};

/// Run a registered layout algorithm.
///
/// The result's vertex table is the input's (materialized when absent) with
/// the coordinate columns replaced or appended. Its edge table is the input
/// edge table, unchanged.
pub fn layout(
    graph: &TabularGraph,
    algorithm: &str,
    options: &LayoutOptions,
    config: &AdapterConfig,
    backend: &dyn AlgorithmBackend,
) -> Result<TabularGraph> {
    let descriptor = AlgorithmRegistry::layout().lookup(algorithm)?;
    let params = prepare_params(descriptor, config, &options.params)?;
    let directed = resolve_directed(options.directed, descriptor, config);
    let x_col = options.x_col.as_deref().unwrap_or(config.layout.x_column.as_str());
    let y_col = options.y_col.as_deref().unwrap_or(config.layout.y_column.as_str());
    if x_col == y_col {
        return Err(ConfigError::invalid(
            "y_col",
            format!("x and y columns must differ, both are '{}'", x_col),
        )
        .into());
    }

    let indexed = to_indexed(graph, true, directed)?;
    info!(
        algorithm,
        backend = backend.name(),
        directed,
        vertices = indexed.vertex_count(),
        "running layout algorithm"
    );
    let output = backend
        .run(&indexed, algorithm, &params)
        .map_err(|e| BridgeError::computation(algorithm, e))?;
    let coords = match output {
        AlgorithmOutput::Coordinates(coords) => coords,
        other => return Err(unexpected(algorithm, "coordinates", &other)),
    };
    if coords.len() != indexed.vertex_count() {
        return Err(BridgeError::computation(
            algorithm,
            BackendError::UnexpectedOutput {
                expected: format!("{} coordinates", indexed.vertex_count()),
                found: format!("{} coordinates", coords.len()),
            },
        ));
    }

    let from_options = FromIndexedOptions {
        identifier_policy: config.identifier_policy,
        ..FromIndexedOptions::default()
    };
    let merged = from_indexed(&indexed, Some(graph), &from_options)?;
    let node = merged.node().map(str::to_string);
    let mut nodes = merged.nodes().cloned().unwrap_or_default();
    for name in [x_col, y_col] {
        if node.as_deref() == Some(name) {
            return Err(SchemaError::ReservedNameCollision {
                name: name.to_string(),
                table: "vertex",
            }
            .into());
        }
    }
    nodes.replace_column(x_col, Column::from_values(x_col, coords.iter().map(|c| c[0]))?)?;
    nodes.replace_column(y_col, Column::from_values(y_col, coords.iter().map(|c| c[1]))?)?;

    let bindings = Bindings {
        source: graph.source().to_string(),
        destination: graph.destination().to_string(),
        node,
        edge: graph.edge().map(str::to_string),
    };
    Ok(TabularGraph::from_parts(graph.edges().clone(), Some(nodes), bindings))
}
