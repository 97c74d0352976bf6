//! Reserved column names and algorithm defaults
//!
//! Reserved names are only used when the caller supplied no binding of their
//! own. A user attribute that collides with one of them is a schema error.

/// Reserved identifier names
pub mod reserved {
    /// Node identifier column, and the vertex attribute that carries each
    /// vertex's identifier through an indexed graph
    pub const NODE: &str = "_n";

    /// Default source column when no binding exists
    pub const SOURCE: &str = "source";

    /// Default destination column when no binding exists
    pub const DESTINATION: &str = "target";

    /// Vertex attribute recognized as a best-guess identifier on graphs
    /// produced outside this crate
    pub const NAME_ATTR: &str = "name";
}

/// Layout output columns
pub mod layout {
    pub const X_COLUMN: &str = "x";
    pub const Y_COLUMN: &str = "y";
}

/// Iterative algorithm defaults
pub mod iteration {
    /// PageRank damping factor
    pub const DAMPING: f64 = 0.85;

    /// Maximum power-iteration rounds
    pub const MAX_ITERATIONS: usize = 100;

    /// Convergence threshold (max absolute score change)
    pub const TOLERANCE: f64 = 1e-6;

    /// Force-directed layout rounds
    pub const LAYOUT_ITERATIONS: usize = 200;
}

/// Supported configuration schema versions
pub const SUPPORTED_CONFIG_VERSIONS: &[u32] = &[1];
