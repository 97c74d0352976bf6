//! Centrality measures
//!
//! Path-based measures are unweighted (hop counts) and follow the view's
//! traversal direction. Spectral measures use power iteration with the same
//! damping / iteration / tolerance knobs as the dependency-graph ranking.

use std::collections::VecDeque;

use super::params;
use super::GraphView;
use crate::shared::constants::iteration;
use crate::shared::models::Value;
use crate::shared::ports::{BackendError, Params};

/// Degree per vertex. `mode` is `all` (default), `in` or `out`; on
/// undirected graphs every mode counts all incident edge ends.
pub(super) fn degree(view: &GraphView, params: &Params) -> Result<Vec<Value>, BackendError> {
    let mode = params::str_or(params, "mode", "all")?;
    let (count_in, count_out) = match mode {
        _ if !view.is_directed() => (true, true),
        "all" => (true, true),
        "in" => (true, false),
        "out" => (false, true),
        other => {
            return Err(BackendError::invalid(
                "mode",
                format!("expected all, in or out, got '{}'", other),
            ))
        }
    };
    let mut degrees = vec![0i64; view.vertex_count()];
    for (src, dst) in view.endpoints() {
        if count_out {
            degrees[src] += 1;
        }
        if count_in {
            degrees[dst] += 1;
        }
    }
    Ok(degrees.into_iter().map(Value::Int).collect())
}

/// PageRank with uniform teleportation and dangling-mass redistribution
pub(super) fn pagerank(view: &GraphView, params: &Params) -> Result<Vec<Value>, BackendError> {
    let damping = params::f64_or(params, "damping", iteration::DAMPING)?;
    if !(0.0..=1.0).contains(&damping) {
        return Err(BackendError::invalid("damping", "must be within [0, 1]"));
    }
    let max_iterations = params::usize_or(params, "max_iterations", iteration::MAX_ITERATIONS)?;
    let tolerance = params::f64_or(params, "tolerance", iteration::TOLERANCE)?;

    let n = view.vertex_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    let nf = n as f64;
    let out_degree: Vec<usize> = (0..n).map(|v| view.out_edges(v).len()).collect();
    let mut scores = vec![1.0 / nf; n];

    for _ in 0..max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&v| out_degree[v] == 0)
            .map(|v| scores[v])
            .sum();
        let base = (1.0 - damping) / nf + damping * dangling / nf;

        let mut next = vec![base; n];
        for (v, slot) in next.iter_mut().enumerate() {
            for &(u, _) in view.in_edges(v) {
                *slot += damping * scores[u] / out_degree[u] as f64;
            }
        }

        let max_diff = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        scores = next;
        if max_diff < tolerance {
            break;
        }
    }
    Ok(scores.into_iter().map(Value::Float).collect())
}

/// HITS hub and authority scores, each scaled so the maximum is 1
pub(super) fn hits(
    view: &GraphView,
    params: &Params,
) -> Result<(Vec<Value>, Vec<Value>), BackendError> {
    let max_iterations = params::usize_or(params, "max_iterations", iteration::MAX_ITERATIONS)?;
    let tolerance = params::f64_or(params, "tolerance", iteration::TOLERANCE)?;

    let n = view.vertex_count();
    let mut hubs = vec![1.0; n];
    let mut authorities = vec![0.0; n];
    for _ in 0..max_iterations {
        // Authority(v) = Σ Hub(u) over u → v
        for (v, slot) in authorities.iter_mut().enumerate() {
            *slot = view.in_edges(v).iter().map(|&(u, _)| hubs[u]).sum();
        }
        scale_to_max(&mut authorities);

        // Hub(v) = Σ Authority(w) over v → w
        let mut next = vec![0.0; n];
        for (v, slot) in next.iter_mut().enumerate() {
            *slot = view.out_edges(v).iter().map(|&(w, _)| authorities[w]).sum();
        }
        scale_to_max(&mut next);

        let max_diff = max_abs_diff(&next, &hubs);
        hubs = next;
        if max_diff < tolerance {
            break;
        }
    }
    Ok((to_floats(hubs), to_floats(authorities)))
}

/// Eigenvector centrality over undirected adjacency, maximum scaled to 1.
///
/// Iterates `(A + I)x`; the shift keeps bipartite graphs from oscillating
/// without changing the leading eigenvector.
pub(super) fn eigenvector_centrality(
    view: &GraphView,
    params: &Params,
) -> Result<Vec<Value>, BackendError> {
    let max_iterations = params::usize_or(params, "max_iterations", iteration::MAX_ITERATIONS)?;
    let tolerance = params::f64_or(params, "tolerance", iteration::TOLERANCE)?;

    let n = view.vertex_count();
    let mut scores = vec![1.0; n];
    for _ in 0..max_iterations {
        let mut next = scores.clone();
        for (src, dst) in view.endpoints() {
            next[dst] += scores[src];
            if src != dst {
                next[src] += scores[dst];
            }
        }
        scale_to_max(&mut next);
        let max_diff = max_abs_diff(&next, &scores);
        scores = next;
        if max_diff < tolerance {
            break;
        }
    }
    Ok(to_floats(scores))
}

/// Brandes betweenness; undirected scores count each pair once
pub(super) fn betweenness(view: &GraphView) -> Vec<Value> {
    let n = view.vertex_count();
    let mut scores = vec![0.0; n];
    for s in 0..n {
        let paths = ShortestPaths::from_source(view, s);
        let mut delta = vec![0.0; n];
        for &w in paths.order.iter().rev() {
            for &(v, _) in &paths.preds[w] {
                delta[v] += paths.sigma[v] / paths.sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                scores[w] += delta[w];
            }
        }
    }
    if !view.is_directed() {
        scores.iter_mut().for_each(|s| *s /= 2.0);
    }
    to_floats(scores)
}

/// Brandes edge betweenness, one score per edge
pub(super) fn edge_betweenness(view: &GraphView) -> Vec<Value> {
    let n = view.vertex_count();
    let mut scores = vec![0.0; view.edge_count()];
    for s in 0..n {
        let paths = ShortestPaths::from_source(view, s);
        let mut delta = vec![0.0; n];
        for &w in paths.order.iter().rev() {
            for &(v, e) in &paths.preds[w] {
                let credit = paths.sigma[v] / paths.sigma[w] * (1.0 + delta[w]);
                scores[e] += credit;
                delta[v] += credit;
            }
        }
    }
    if !view.is_directed() {
        scores.iter_mut().for_each(|s| *s /= 2.0);
    }
    to_floats(scores)
}

/// Inverse mean distance to reachable vertices; null when none are reachable
pub(super) fn closeness(view: &GraphView) -> Vec<Value> {
    (0..view.vertex_count())
        .map(|s| {
            let dist = bfs_distances(view, s);
            let (reached, total) = dist
                .iter()
                .enumerate()
                .filter_map(|(v, d)| d.filter(|_| v != s))
                .fold((0usize, 0usize), |(count, sum), d| (count + 1, sum + d));
            if reached == 0 {
                Value::Null
            } else {
                Value::Float(reached as f64 / total as f64)
            }
        })
        .collect()
}

/// Sum of inverse distances to every other reachable vertex
pub(super) fn harmonic_centrality(view: &GraphView) -> Vec<Value> {
    (0..view.vertex_count())
        .map(|s| {
            let sum: f64 = bfs_distances(view, s)
                .iter()
                .enumerate()
                .filter_map(|(v, d)| d.filter(|&d| v != s && d > 0))
                .map(|d| 1.0 / d as f64)
                .sum();
            Value::Float(sum)
        })
        .collect()
}

/// Largest hop distance to a reachable vertex
pub(super) fn eccentricity(view: &GraphView) -> Vec<Value> {
    (0..view.vertex_count())
        .map(|s| {
            let max = bfs_distances(view, s).into_iter().flatten().max().unwrap_or(0);
            Value::Int(max as i64)
        })
        .collect()
}

/// Single-source shortest-path DAG (unweighted)
struct ShortestPaths {
    /// Vertices in non-decreasing distance order
    order: Vec<usize>,
    /// Number of shortest paths from the source
    sigma: Vec<f64>,
    /// `(predecessor, edge)` pairs on shortest paths
    preds: Vec<Vec<(usize, usize)>>,
}

impl ShortestPaths {
    fn from_source(view: &GraphView, source: usize) -> Self {
        let n = view.vertex_count();
        let mut dist: Vec<Option<usize>> = vec![None; n];
        let mut sigma = vec![0.0; n];
        let mut preds = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::new();

        dist[source] = Some(0);
        sigma[source] = 1.0;
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v].unwrap_or(0);
            for &(w, e) in view.out_edges(v) {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push((v, e));
                }
            }
        }
        Self {
            order,
            sigma,
            preds,
        }
    }
}

fn bfs_distances(view: &GraphView, source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.vertex_count()];
    let mut queue = VecDeque::from([source]);
    dist[source] = Some(0);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &(w, _) in view.out_edges(v) {
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    dist
}

fn scale_to_max(values: &mut [f64]) {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        values.iter_mut().for_each(|v| *v /= max);
    }
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn to_floats(values: Vec<f64>) -> Vec<Value> {
    values.into_iter().map(Value::Float).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::IndexedGraph;

    fn floats(values: &[Value]) -> Vec<f64> {
        values.iter().map(|v| v.as_f64().unwrap()).collect()
    }

    fn star(directed: bool) -> GraphView {
        let g = IndexedGraph::new(4, vec![(0, 1), (0, 2), (0, 3)], directed).unwrap();
        GraphView::new(&g)
    }

    fn path(directed: bool) -> GraphView {
        let g = IndexedGraph::new(3, vec![(0, 1), (1, 2)], directed).unwrap();
        GraphView::new(&g)
    }

    #[test]
    fn test_degree_modes() {
        let view = star(true);
        let out = degree(&view, &serde_json::json!({"mode": "out"}).as_object().cloned().unwrap())
            .unwrap();
        assert_eq!(out, vec![Value::Int(3), Value::Int(0), Value::Int(0), Value::Int(0)]);
        let bad = serde_json::json!({"mode": "sideways"}).as_object().cloned().unwrap();
        assert!(degree(&view, &bad).is_err());
    }

    #[test]
    fn test_pagerank_sums_to_one() {
        let scores = floats(&pagerank(&star(true), &Params::new()).unwrap());
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        // Leaves receive all of the centre's rank
        assert!(scores[1] > scores[0]);
    }

    #[test]
    fn test_hits_on_star() {
        let (hubs, authorities) = hits(&star(true), &Params::new()).unwrap();
        assert_eq!(floats(&hubs), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(floats(&authorities), vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_eigenvector_centre_is_max() {
        let scores = floats(&eigenvector_centrality(&star(false), &Params::new()).unwrap());
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!(scores[1] < 1.0);
        assert!((scores[1] - scores[3]).abs() < 1e-9);
    }

    #[test]
    fn test_betweenness_path() {
        assert_eq!(floats(&betweenness(&path(false))), vec![0.0, 1.0, 0.0]);
        assert_eq!(floats(&betweenness(&path(true))), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_edge_betweenness_path() {
        assert_eq!(floats(&edge_betweenness(&path(false))), vec![2.0, 2.0]);
    }

    #[test]
    fn test_closeness_and_eccentricity() {
        let view = path(true);
        let closeness = closeness(&view);
        assert_eq!(closeness[0], Value::Float(2.0 / 3.0));
        assert_eq!(closeness[2], Value::Null);
        assert_eq!(
            eccentricity(&path(false)),
            vec![Value::Int(2), Value::Int(1), Value::Int(2)]
        );
        assert_eq!(harmonic_centrality(&path(false))[0], Value::Float(1.5));
    }
}
