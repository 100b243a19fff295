//! Routing data exported by a server-side route dumper.
//!
//! ```json
//! {
//!     "base_url": "",
//!     "routes": {"home": {"tokens": [["text", "/"]]}},
//!     "prefix": "",
//!     "host": "localhost",
//!     "scheme": "http"
//! }
//! ```
//!
//! Fields other than `routes` are optional; unknown fields are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::route::RouteTable;
use crate::router::Router;

/// A routing dump: a route table plus the context it was exported for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingData {
    /// Base URL prepended to every path.
    #[serde(default)]
    pub base_url: String,
    /// Exported routes.
    pub routes: RouteTable,
    /// Route name prefix.
    #[serde(default)]
    pub prefix: String,
    /// Host the routes are served from.
    #[serde(default)]
    pub host: String,
    /// Scheme the routes are served over.
    #[serde(default)]
    pub scheme: String,
}

impl RoutingData {
    /// Parses a routing dump.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::Json`](crate::UrlGenError::Json) on malformed
    /// data.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        debug!(routes = data.routes.len(), "loaded routing data");
        Ok(data)
    }

    /// Reads and parses a routing dump file.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::Io`](crate::UrlGenError::Io) if the file
    /// cannot be read and [`UrlGenError::Json`](crate::UrlGenError::Json)
    /// on malformed data.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading routing data");
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Returns the exported context.
    #[must_use]
    pub fn context(&self) -> Context {
        Context::new()
            .with_base_url(&self.base_url)
            .with_prefix(&self.prefix)
            .with_host(&self.host)
            .with_scheme(&self.scheme)
    }

    /// Builds a router with the exported context.
    #[must_use]
    pub fn into_router(self) -> Router {
        let context = self.context();
        Router::new(self.routes, context)
    }
}

impl From<RoutingData> for Router {
    fn from(data: RoutingData) -> Self {
        data.into_router()
    }
}
