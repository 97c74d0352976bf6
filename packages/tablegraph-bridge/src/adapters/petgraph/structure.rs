//! Structural measures and graph transforms

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::unionfind::UnionFind;

use super::params;
use super::GraphView;
use crate::shared::models::{Column, ElementKind, IndexedGraph, Value};
use crate::shared::ports::{BackendError, Params};

/// k-core number of every vertex (Batagelj–Zaversnik bucket peeling)
pub(super) fn coreness(view: &GraphView) -> Vec<usize> {
    let adjacency = view.simple_adjacency();
    let n = adjacency.len();
    let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // Vertices sorted by degree, with bucket start offsets
    let mut bucket_start = vec![0usize; max_degree + 1];
    for &d in &degree {
        bucket_start[d] += 1;
    }
    let mut start = 0;
    for slot in bucket_start.iter_mut() {
        let count = *slot;
        *slot = start;
        start += count;
    }
    let mut position = vec![0usize; n];
    let mut order = vec![0usize; n];
    {
        let mut next = bucket_start.clone();
        for v in 0..n {
            position[v] = next[degree[v]];
            order[position[v]] = v;
            next[degree[v]] += 1;
        }
    }

    for i in 0..n {
        let v = order[i];
        for &u in &adjacency[v] {
            if degree[u] > degree[v] {
                // Move u to the front of its bucket, then shrink its degree
                let du = degree[u];
                let pu = position[u];
                let pw = bucket_start[du];
                let w = order[pw];
                if u != w {
                    order.swap(pu, pw);
                    position[u] = pw;
                    position[w] = pu;
                }
                bucket_start[du] += 1;
                degree[u] -= 1;
            }
        }
    }
    degree
}

pub(super) fn coreness_values(view: &GraphView) -> Vec<Value> {
    coreness(view).into_iter().map(Value::from).collect()
}

/// Local clustering coefficient; null when the vertex has fewer than two
/// neighbors
pub(super) fn local_transitivity(view: &GraphView) -> Vec<Value> {
    let adjacency = view.simple_adjacency();
    adjacency
        .iter()
        .map(|neighbors| {
            let k = neighbors.len();
            if k < 2 {
                return Value::Null;
            }
            let mut links = 0usize;
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if adjacency[a].binary_search(&b).is_ok() {
                        links += 1;
                    }
                }
            }
            Value::Float(links as f64 / (k * (k - 1) / 2) as f64)
        })
        .collect()
}

/// Cut vertices of the undirected graph (iterative Tarjan lowpoint)
pub(super) fn articulation_points(view: &GraphView) -> Vec<Value> {
    let adjacency = view.simple_adjacency();
    let n = adjacency.len();
    let mut discovery: Vec<Option<usize>> = vec![None; n];
    let mut low = vec![0usize; n];
    let mut is_cut = vec![false; n];
    let mut timer = 0;

    for root in 0..n {
        if discovery[root].is_some() {
            continue;
        }
        discovery[root] = Some(timer);
        low[root] = timer;
        timer += 1;
        let mut root_children = 0;
        // (vertex, parent, next neighbor index)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (v, parent, next) = *frame;
            if let Some(&u) = adjacency[v].get(next) {
                frame.2 += 1;
                if Some(u) == parent {
                    continue;
                }
                match discovery[u] {
                    Some(d) => low[v] = low[v].min(d),
                    None => {
                        discovery[u] = Some(timer);
                        low[u] = timer;
                        timer += 1;
                        if v == root {
                            root_children += 1;
                        }
                        stack.push((u, Some(v), 0));
                    }
                }
            } else {
                stack.pop();
                if let Some(p) = parent {
                    low[p] = low[p].min(low[v]);
                    let p_disc = discovery[p].unwrap_or(0);
                    if p != root && low[v] >= p_disc {
                        is_cut[p] = true;
                    }
                }
            }
        }
        if root_children > 1 {
            is_cut[root] = true;
        }
    }
    is_cut.into_iter().map(Value::Bool).collect()
}

/// Rank of every vertex in a topological order (directed, acyclic only)
pub(super) fn topological_rank(view: &GraphView) -> Result<Vec<Value>, BackendError> {
    if !view.is_directed() {
        return Err(BackendError::UnsupportedDirectedness {
            required: "directed",
        });
    }
    let order = toposort(view.graph(), None)
        .map_err(|cycle| BackendError::Cycle(cycle.node_id().index()))?;
    let mut rank = vec![Value::Null; view.vertex_count()];
    for (position, node) in order.into_iter().enumerate() {
        rank[node.index()] = Value::from(position);
    }
    Ok(rank)
}

/// Minimum spanning forest (Kruskal). Edges are weighted by `weights`, or
/// all equal; kept edges stay in their original order.
pub(super) fn spanning_tree(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<IndexedGraph, BackendError> {
    let weights = params::edge_weights(graph, params)?;
    let mut candidates: Vec<usize> = (0..view.edge_count()).collect();
    if let Some(w) = &weights {
        candidates.sort_by(|&a, &b| w[a].total_cmp(&w[b]));
    }

    let mut forest = UnionFind::new(view.vertex_count());
    let edges = graph.edges();
    let mut kept: Vec<usize> = candidates
        .into_iter()
        .filter(|&e| {
            let (src, dst) = edges[e];
            forest.union(src, dst)
        })
        .collect();
    kept.sort_unstable();

    graph
        .edge_subgraph(&kept)
        .map_err(|e| BackendError::InvalidGraph(e.to_string()))
}

/// Maximal subgraph whose vertices all have degree ≥ `k`
pub(super) fn k_core(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<IndexedGraph, BackendError> {
    let k = params::usize_opt(params, "k")?
        .ok_or_else(|| BackendError::MissingParameter("k".to_string()))?;
    let keep: Vec<usize> = coreness(view)
        .into_iter()
        .enumerate()
        .filter(|&(_, core)| core >= k)
        .map(|(v, _)| v)
        .collect();
    graph
        .induced_subgraph(&keep)
        .map_err(|e| BackendError::InvalidGraph(e.to_string()))
}

/// One side of a bipartite graph, two vertices linked when they share a
/// neighbor. `which` selects the side (`false` by default); the edge
/// attribute `weight` counts the shared neighbors.
pub(super) fn bipartite_projection(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<IndexedGraph, BackendError> {
    let types = params::vertex_types(graph, params, "types")?;
    let side = params::flag_or(params, "which", false)?;
    if let Some((e, _)) = view
        .endpoints()
        .enumerate()
        .find(|&(_, (src, dst))| types[src] == types[dst])
    {
        return Err(BackendError::invalid(
            "types",
            format!("edge {} connects two vertices of the same type", e),
        ));
    }

    let keep: Vec<usize> = (0..graph.vertex_count())
        .filter(|&v| types[v] == side)
        .collect();
    let mut position = vec![None; graph.vertex_count()];
    for (new, &old) in keep.iter().enumerate() {
        position[old] = Some(new);
    }

    let adjacency = view.simple_adjacency();
    let mut shared: BTreeMap<(usize, usize), i64> = BTreeMap::new();
    for (middle, neighbors) in adjacency.iter().enumerate() {
        if types[middle] == side {
            continue;
        }
        let members: Vec<usize> = neighbors.iter().filter_map(|&u| position[u]).collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                *shared.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
    }

    let invalid = |e: crate::errors::SchemaError| BackendError::InvalidGraph(e.to_string());
    let edges: Vec<(usize, usize)> = shared.keys().copied().collect();
    let mut projected = IndexedGraph::new(keep.len(), edges, false).map_err(invalid)?;
    for (name, column) in graph.attributes(ElementKind::Vertex).iter() {
        projected
            .set_attribute(ElementKind::Vertex, name, column.take(&keep).map_err(invalid)?)
            .map_err(invalid)?;
    }
    let counts = Column::from_values("weight", shared.into_values()).map_err(invalid)?;
    projected
        .set_attribute(ElementKind::Edge, "weight", counts)
        .map_err(invalid)?;
    Ok(projected)
}
