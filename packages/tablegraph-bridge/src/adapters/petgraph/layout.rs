//! Layout algorithms: one `[x, y]` pair per vertex position

use std::collections::VecDeque;
use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params;
use super::GraphView;
use crate::shared::constants::iteration;
use crate::shared::models::IndexedGraph;
use crate::shared::ports::{BackendError, Params};

type Coords = Vec<[f64; 2]>;

/// Vertices evenly spaced on the unit circle, starting at angle 0
pub(super) fn circle(view: &GraphView) -> Coords {
    let n = view.vertex_count();
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            [angle.cos(), angle.sin()]
        })
        .collect()
}

/// `center` (default 0) at the origin, every other vertex on the unit circle
pub(super) fn star(view: &GraphView, params: &Params) -> Result<Coords, BackendError> {
    let n = view.vertex_count();
    let center = params::usize_or(params, "center", 0)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if center >= n {
        return Err(BackendError::invalid(
            "center",
            format!("vertex {} is out of range for {} vertices", center, n),
        ));
    }
    let ring = (n - 1).max(1) as f64;
    let mut coords = vec![[0.0, 0.0]; n];
    for (slot, v) in (0..n).filter(|&v| v != center).enumerate() {
        let angle = 2.0 * PI * slot as f64 / ring;
        coords[v] = [angle.cos(), angle.sin()];
    }
    Ok(coords)
}

/// Row-major grid, `width` columns (default ⌈√n⌉)
pub(super) fn grid(view: &GraphView, params: &Params) -> Result<Coords, BackendError> {
    let n = view.vertex_count();
    let default_width = (n as f64).sqrt().ceil().max(1.0) as usize;
    let width = params::usize_or(params, "width", default_width)?;
    if width == 0 {
        return Err(BackendError::invalid("width", "must be at least 1"));
    }
    Ok((0..n)
        .map(|i| [(i % width) as f64, (i / width) as f64])
        .collect())
}

/// Uniform positions in `[-1, 1]²`; reproducible when `seed` is given
pub(super) fn random(view: &GraphView, params: &Params) -> Result<Coords, BackendError> {
    let mut rng = seeded_rng(params)?;
    Ok((0..view.vertex_count())
        .map(|_| [rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)])
        .collect())
}

/// Fruchterman–Reingold force-directed layout with linear cooling
pub(super) fn fruchterman_reingold(
    view: &GraphView,
    params: &Params,
) -> Result<Coords, BackendError> {
    let iterations = params::usize_or(params, "iterations", iteration::LAYOUT_ITERATIONS)?;
    let mut rng = match params::u64_opt(params, "seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(0),
    };

    let n = view.vertex_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    let side = (n as f64).sqrt();
    let k = 1.0;
    let mut pos: Coords = (0..n)
        .map(|_| [rng.gen_range(0.0..side), rng.gen_range(0.0..side)])
        .collect();
    let edges: Vec<(usize, usize)> = view.endpoints().filter(|(s, d)| s != d).collect();

    let start_temp = side / 10.0;
    for step in 0..iterations {
        let temp = start_temp * (1.0 - step as f64 / iterations as f64);
        let mut disp = vec![[0.0f64, 0.0f64]; n];

        for v in 0..n {
            for u in (v + 1)..n {
                let (dx, dy, dist) = delta(&pos, v, u);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[v][0] += fx;
                disp[v][1] += fy;
                disp[u][0] -= fx;
                disp[u][1] -= fy;
            }
        }
        for &(a, b) in &edges {
            let (dx, dy, dist) = delta(&pos, a, b);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[a][0] -= fx;
            disp[a][1] -= fy;
            disp[b][0] += fx;
            disp[b][1] += fy;
        }

        for (p, d) in pos.iter_mut().zip(&disp) {
            let len = (d[0] * d[0] + d[1] * d[1]).sqrt();
            if len > 0.0 {
                let capped = len.min(temp);
                p[0] += d[0] / len * capped;
                p[1] += d[1] / len * capped;
            }
        }
    }
    Ok(pos)
}

/// Two rows: `types == false` at `y = 0`, `types == true` at `y = vgap`;
/// vertices keep their relative order within a row, `hgap` apart
pub(super) fn bipartite(
    graph: &IndexedGraph,
    view: &GraphView,
    params: &Params,
) -> Result<Coords, BackendError> {
    let types = params::vertex_types(graph, params, "types")?;
    let vgap = params::f64_or(params, "vgap", 1.0)?;
    let hgap = params::f64_or(params, "hgap", 1.0)?;

    let mut next_slot = [0usize; 2];
    Ok((0..view.vertex_count())
        .map(|v| {
            let row = usize::from(types[v]);
            let x = next_slot[row] as f64 * hgap;
            next_slot[row] += 1;
            [x, row as f64 * vgap]
        })
        .collect())
}

/// Layered tree drawing: breadth-first depth from `root` (default 0) is the
/// y coordinate, order within a layer the x coordinate. Vertices not reached
/// from the root start further trees, laid out after it.
pub(super) fn tree(view: &GraphView, params: &Params) -> Result<Coords, BackendError> {
    let n = view.vertex_count();
    let root = params::usize_or(params, "root", 0)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if root >= n {
        return Err(BackendError::invalid(
            "root",
            format!("vertex {} is out of range for {} vertices", root, n),
        ));
    }

    let adjacency = view.simple_adjacency();
    let mut depth: Vec<Option<usize>> = vec![None; n];
    let mut layer_width: Vec<usize> = Vec::new();
    let mut coords = vec![[0.0, 0.0]; n];

    let roots = std::iter::once(root).chain((0..n).filter(|&v| v != root));
    for start in roots {
        if depth[start].is_some() {
            continue;
        }
        depth[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            let d = depth[v].unwrap_or(0);
            if layer_width.len() <= d {
                layer_width.resize(d + 1, 0);
            }
            coords[v] = [layer_width[d] as f64, d as f64];
            layer_width[d] += 1;
            for &u in &adjacency[v] {
                if depth[u].is_none() {
                    depth[u] = Some(d + 1);
                    queue.push_back(u);
                }
            }
        }
    }
    Ok(coords)
}

fn seeded_rng(params: &Params) -> Result<StdRng, BackendError> {
    Ok(match params::u64_opt(params, "seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    })
}

/// Vector from `b` to `a` and its (non-zero) length
fn delta(pos: &[[f64; 2]], a: usize, b: usize) -> (f64, f64, f64) {
    let mut dx = pos[a][0] - pos[b][0];
    let mut dy = pos[a][1] - pos[b][1];
    if dx == 0.0 && dy == 0.0 {
        // Coincident vertices: nudge apart deterministically
        dx = 0.01 * (a as f64 - b as f64).signum();
        dy = 0.01;
    }
    let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
    (dx, dy, dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    fn path(n: usize) -> (IndexedGraph, GraphView) {
        let edges = (1..n).map(|i| (i - 1, i)).collect();
        let g = IndexedGraph::new(n, edges, false).unwrap();
        let v = GraphView::new(&g);
        (g, v)
    }

    #[test]
    fn test_circle_on_unit_circle() {
        let (_, v) = path(4);
        for [x, y] in circle(&v) {
            assert!(((x * x + y * y) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_star_center_at_origin() {
        let (_, v) = path(4);
        let coords = star(&v, &params(json!({"center": 2}))).unwrap();
        assert_eq!(coords[2], [0.0, 0.0]);
        assert!(star(&v, &params(json!({"center": 9}))).is_err());
    }

    #[test]
    fn test_grid_width() {
        let (_, v) = path(5);
        let coords = grid(&v, &params(json!({"width": 2}))).unwrap();
        assert_eq!(coords[3], [1.0, 1.0]);
        assert_eq!(coords[4], [0.0, 2.0]);
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let (_, v) = path(6);
        let seeded = params(json!({"seed": 42}));
        assert_eq!(random(&v, &seeded).unwrap(), random(&v, &seeded).unwrap());
    }

    #[test]
    fn test_fruchterman_reingold_finite_and_deterministic() {
        let (_, v) = path(6);
        let p = params(json!({"iterations": 50, "seed": 7}));
        let a = fruchterman_reingold(&v, &p).unwrap();
        assert_eq!(a, fruchterman_reingold(&v, &p).unwrap());
        assert!(a.iter().all(|[x, y]| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_bipartite_rows() {
        let (g, v) = path(4);
        let p = params(json!({"types": [false, true, false, true], "vgap": 2.0}));
        let coords = bipartite(&g, &v, &p).unwrap();
        assert_eq!(coords, vec![[0.0, 0.0], [0.0, 2.0], [1.0, 0.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_tree_layers_from_root() {
        let (_, v) = path(3);
        let coords = tree(&v, &params(json!({"root": 1}))).unwrap();
        assert_eq!(coords[1], [0.0, 0.0]);
        assert_eq!(coords[0][1], 1.0);
        assert_eq!(coords[2][1], 1.0);
    }
}
