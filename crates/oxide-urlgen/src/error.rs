//! Error types for URL generation.

use thiserror::Error;

/// Errors raised while loading route tables or generating URLs.
#[derive(Debug, Error)]
pub enum UrlGenError {
    /// Neither the prefixed nor the bare route name exists.
    #[error("The route \"{0}\" does not exist.")]
    RouteNotFound(String),

    /// A mandatory variable has no supplied value and no default.
    #[error("The route \"{route}\" requires the parameter \"{parameter}\".")]
    MissingParameter {
        /// Route being generated.
        route: String,
        /// Variable that could not be resolved.
        parameter: String,
    },

    /// A token in the route table has an unknown tag or a malformed shape.
    #[error("unsupported token: {0}")]
    UnsupportedToken(String),

    /// The page location could not be parsed as an absolute URL.
    #[error("invalid location \"{href}\": {source}")]
    InvalidLocation {
        /// The rejected href.
        href: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },

    /// Malformed routing data.
    #[error("invalid routing data: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading routing data.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for URL generation.
pub type Result<T> = std::result::Result<T, UrlGenError>;
