//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// A field holds a value the adapter cannot use
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Algorithm defaults reference an unregistered algorithm
    #[error("Unknown algorithm '{name}' in algorithm_defaults. {suggestion}")]
    UnknownAlgorithm { name: String, suggestion: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown algorithm error with the closest registered name
    pub fn unknown_algorithm_with_suggestion(name: impl Into<String>, candidates: &[&str]) -> Self {
        let name = name.into();
        let suggestion = find_closest_match(&name, candidates);
        Self::UnknownAlgorithm { name, suggestion }
    }
}

/// Find closest match using simple edit distance
fn find_closest_match(target: &str, candidates: &[&str]) -> String {
    match candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(target, candidate))
    {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No algorithms are registered".to_string(),
    }
}

/// Simple Levenshtein distance implementation
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, c1) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, c2) in b.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
