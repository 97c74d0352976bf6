//! "compute" dispatch: decorate a tabular graph with a derived attribute, or
//! replace it with a structural transform.

use tracing::{info, warn};

use super::registry::{AlgorithmDescriptor, AlgorithmRegistry};
use super::ComputeOptions;
use crate::config::AdapterConfig;
use crate::errors::{BridgeError, Result, SchemaError};
use crate::features::conversion::{from_indexed, to_indexed, FromIndexedOptions};
use crate::shared::constants::reserved;
use crate::shared::models::{Column, ElementKind, IndexedGraph, TabularGraph, Value};
use crate::shared::ports::{AlgorithmBackend, AlgorithmOutput, BackendError, Params};

/// Run a registered compute algorithm and merge its result into `graph`.
///
/// Unknown names fail before any conversion work. Per-element results are
/// attached under `options.out_col` (default: the algorithm name); existing
/// columns of the same name are kept.
pub fn compute(
    graph: &TabularGraph,
    algorithm: &str,
    options: &ComputeOptions,
    config: &AdapterConfig,
    backend: &dyn AlgorithmBackend,
) -> Result<TabularGraph> {
    let descriptor = AlgorithmRegistry::compute().lookup(algorithm)?;
    let params = prepare_params(descriptor, config, &options.params)?;
    let directed = resolve_directed(options.directed, descriptor, config);

    let mut indexed = to_indexed(graph, true, directed)?;
    info!(
        algorithm,
        backend = backend.name(),
        directed,
        vertices = indexed.vertex_count(),
        edges = indexed.edge_count(),
        "running compute algorithm"
    );
    let output = backend
        .run(&indexed, algorithm, &params)
        .map_err(|e| BridgeError::computation(algorithm, e))?;

    if !descriptor.arity.accepts(&output) {
        return Err(unexpected(algorithm, descriptor.arity.expected_output(), &output));
    }
    let out_col = options.out_col.as_deref().unwrap_or(algorithm);
    match output {
        AlgorithmOutput::VertexValues(values) => {
            attach(graph, &mut indexed, ElementKind::Vertex, out_col, values, algorithm)?;
        }
        AlgorithmOutput::EdgeValues(values) => {
            attach(graph, &mut indexed, ElementKind::Edge, out_col, values, algorithm)?;
        }
        AlgorithmOutput::Graph(derived) => indexed = derived,
        other => return Err(unexpected(algorithm, descriptor.arity.expected_output(), &other)),
    }

    let from_options = FromIndexedOptions {
        identifier_policy: config.identifier_policy,
        ..FromIndexedOptions::default()
    };
    Ok(from_indexed(&indexed, Some(graph), &from_options)?)
}

/// Config defaults overlaid with caller params, with required params checked
pub(super) fn prepare_params(
    descriptor: &AlgorithmDescriptor,
    config: &AdapterConfig,
    caller: &Params,
) -> Result<Params> {
    let params = config.params_for(descriptor.name, caller);
    descriptor
        .check_params(&params)
        .map_err(|e| BridgeError::computation(descriptor.name, e))?;
    Ok(params)
}

/// Caller override, then the registry default, then the configured default
pub(super) fn resolve_directed(
    requested: Option<bool>,
    descriptor: &AlgorithmDescriptor,
    config: &AdapterConfig,
) -> bool {
    requested
        .or(descriptor.directed)
        .unwrap_or(config.default_directed)
}

pub(super) fn unexpected(algorithm: &str, expected: &str, found: &AlgorithmOutput) -> BridgeError {
    BridgeError::computation(
        algorithm,
        BackendError::UnexpectedOutput {
            expected: expected.to_string(),
            found: found.kind_name().to_string(),
        },
    )
}

fn attach(
    graph: &TabularGraph,
    indexed: &mut IndexedGraph,
    kind: ElementKind,
    name: &str,
    values: Vec<Value>,
    algorithm: &str,
) -> Result<()> {
    let expected = indexed.element_count(kind);
    if values.len() != expected {
        return Err(BridgeError::computation(
            algorithm,
            BackendError::UnexpectedOutput {
                expected: format!("{} {} values", expected, kind),
                found: format!("{} values", values.len()),
            },
        ));
    }
    if kind == ElementKind::Vertex && name == reserved::NODE {
        return Err(SchemaError::ReservedNameCollision {
            name: name.to_string(),
            table: "vertex",
        }
        .into());
    }
    let existing = match kind {
        ElementKind::Vertex => graph.nodes().is_some_and(|nodes| nodes.has_column(name)),
        ElementKind::Edge => graph.edges().has_column(name),
    };
    if existing {
        warn!(
            algorithm,
            column = name,
            "derived attribute discarded: an existing column has the same name"
        );
        return Ok(());
    }
    indexed.set_attribute(kind, name, Column::new(name, values)?)?;
    Ok(())
}
