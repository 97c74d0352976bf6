//! Collaborator ports (hexagonal boundaries)

pub mod algorithm_backend;

pub use algorithm_backend::{AlgorithmBackend, AlgorithmOutput, BackendError, Params};
