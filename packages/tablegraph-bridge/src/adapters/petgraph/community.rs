//! Components and community detection
//!
//! Every labelling is renumbered so that labels appear in increasing order of
//! their first vertex: vertex 0 always has label 0.

use std::collections::BTreeMap;

use petgraph::algo::tarjan_scc;
use petgraph::unionfind::UnionFind;

use super::params;
use super::GraphView;
use crate::shared::constants::iteration;
use crate::shared::models::{IndexedGraph, Value};
use crate::shared::ports::{BackendError, Params};

/// Weakly connected components
pub(super) fn connected_components(view: &GraphView) -> Vec<Value> {
    let n = view.vertex_count();
    let mut sets = UnionFind::new(n);
    for (src, dst) in view.endpoints() {
        sets.union(src, dst);
    }
    let roots: Vec<usize> = (0..n).map(|v| sets.find(v)).collect();
    to_labels(&renumber(&roots))
}

/// Strongly connected components (weak components on undirected graphs)
pub(super) fn strongly_connected_components(view: &GraphView) -> Vec<Value> {
    if !view.is_directed() {
        return connected_components(view);
    }
    let mut membership = vec![0; view.vertex_count()];
    for (component, nodes) in tarjan_scc(view.graph()).into_iter().enumerate() {
        for node in nodes {
            membership[node.index()] = component;
        }
    }
    to_labels(&renumber(&membership))
}

/// Asynchronous label propagation in vertex order.
///
/// Each vertex adopts the label with the largest (weighted) count among its
/// neighbors, keeping its current label on ties when it is among the best and
/// otherwise taking the smallest tied label. Stops when a sweep changes
/// nothing or after `max_iterations` sweeps.
pub(super) fn label_propagation(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<Vec<Value>, BackendError> {
    let max_iterations = params::usize_or(params, "max_iterations", iteration::MAX_ITERATIONS)?;
    let weights = params::edge_weights(graph, params)?;
    let weight = |e: usize| weights.as_ref().map_or(1.0, |w| w[e]);

    let n = view.vertex_count();
    let adjacency = undirected_adjacency(view);
    let mut labels: Vec<usize> = (0..n).collect();
    for _ in 0..max_iterations {
        let mut changed = false;
        for v in 0..n {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for &(u, e) in &adjacency[v] {
                if u != v {
                    *counts.entry(labels[u]).or_insert(0.0) += weight(e);
                }
            }
            let Some(best) = counts.values().copied().reduce(f64::max) else {
                continue;
            };
            if counts.get(&labels[v]) == Some(&best) {
                continue;
            }
            if let Some((&label, _)) = counts.iter().find(|(_, &c)| c == best) {
                labels[v] = label;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    Ok(to_labels(&renumber(&labels)))
}

/// Louvain modularity optimisation (undirected only).
///
/// Local moving until no vertex improves modularity, then aggregation of
/// communities into super-vertices, repeated until a level makes no move.
pub(super) fn multilevel(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<Vec<Value>, BackendError> {
    if view.is_directed() {
        return Err(BackendError::UnsupportedDirectedness {
            required: "undirected",
        });
    }
    let weights = params::edge_weights(graph, params)?;
    let mut edges: Vec<(usize, usize, f64)> = view
        .endpoints()
        .enumerate()
        .map(|(e, (src, dst))| (src, dst, weights.as_ref().map_or(1.0, |w| w[e])))
        .collect();

    let mut membership: Vec<usize> = (0..view.vertex_count()).collect();
    let mut level_size = view.vertex_count();
    loop {
        let (communities, moved) = louvain_level(level_size, &edges);
        if !moved {
            break;
        }
        let communities = renumber(&communities);
        for slot in membership.iter_mut() {
            *slot = communities[*slot];
        }
        level_size = communities.iter().copied().max().map_or(0, |m| m + 1);

        let mut aggregated: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(src, dst, w) in &edges {
            let (a, b) = (communities[src], communities[dst]);
            *aggregated.entry((a.min(b), a.max(b))).or_insert(0.0) += w;
        }
        edges = aggregated.into_iter().map(|((a, b), w)| (a, b, w)).collect();
    }
    Ok(to_labels(&renumber(&membership)))
}

/// One Louvain level: returns the community of each vertex and whether any
/// vertex moved.
fn louvain_level(n: usize, edges: &[(usize, usize, f64)]) -> (Vec<usize>, bool) {
    const MAX_SWEEPS: usize = 100;
    const EPSILON: f64 = 1e-12;

    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut strength = vec![0.0; n];
    for &(src, dst, w) in edges {
        strength[src] += w;
        strength[dst] += w;
        if src != dst {
            adjacency[src].push((dst, w));
            adjacency[dst].push((src, w));
        }
    }
    let total: f64 = strength.iter().sum();
    let mut community: Vec<usize> = (0..n).collect();
    if total <= 0.0 {
        return (community, false);
    }

    let mut community_strength = strength.clone();
    let mut moved_any = false;
    for _ in 0..MAX_SWEEPS {
        let mut moved = false;
        for v in 0..n {
            let current = community[v];
            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for &(u, w) in &adjacency[v] {
                *links.entry(community[u]).or_insert(0.0) += w;
            }

            community_strength[current] -= strength[v];
            let gain = |c: usize, link: f64| link - community_strength[c] * strength[v] / total;
            let mut best = current;
            let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0));
            for (&c, &link) in &links {
                let g = gain(c, link);
                if g > best_gain + EPSILON {
                    best = c;
                    best_gain = g;
                }
            }
            community_strength[best] += strength[v];

            if best != current {
                community[v] = best;
                moved = true;
                moved_any = true;
            }
        }
        if !moved {
            break;
        }
    }
    (community, moved_any)
}

/// `(neighbor, edge)` pairs ignoring direction
fn undirected_adjacency(view: &GraphView) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency = vec![Vec::new(); view.vertex_count()];
    for (e, (src, dst)) in view.endpoints().enumerate() {
        adjacency[src].push((dst, e));
        if src != dst {
            adjacency[dst].push((src, e));
        }
    }
    adjacency
}

/// Relabel so labels are dense and ordered by first occurrence
pub(super) fn renumber(raw: &[usize]) -> Vec<usize> {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    raw.iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect()
}

fn to_labels(labels: &[usize]) -> Vec<Value> {
    labels.iter().map(|&l| Value::from(l)).collect()
}
