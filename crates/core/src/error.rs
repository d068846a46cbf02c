//! Error types for the menukit domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all menukit operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Route lookup errors ---
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    // --- Rendering errors ---
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum RouteError {
    #[error("No route named '{0}'")]
    NotFound(String),

    #[error("No route matches path '{0}'")]
    NoMatch(String),

    #[error("Argument mismatch for route '{route}': {detail}")]
    ArgumentMismatch { route: String, detail: String },

    #[error("Invalid route pattern '{pattern}': {detail}")]
    InvalidPattern { pattern: String, detail: String },
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("No content section named '{0}'")]
    MissingContent(String),

    #[error("No menu named '{0}' in this view")]
    UnknownMenu(String),
}
