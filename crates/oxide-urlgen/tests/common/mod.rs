#![allow(dead_code)]

use oxide_urlgen::{Context, Params, Router, RouteTable, UrlGenError, UrlGenerator};
use serde_json::Value;

/// Context of a page served from `http://localhost`.
pub fn localhost() -> Context {
    Context::new().with_scheme("http").with_host("localhost")
}

/// Builds a router from a JSON object of exported routes.
pub fn router(routes: Value, context: Context) -> Router {
    let routes: RouteTable = serde_json::from_value(routes.clone())
        .unwrap_or_else(|e| panic!("Invalid routes: {routes}\nError: {e:?}"));
    Router::new(routes, context)
}

/// Generates a relative URL, panicking on error.
pub fn path(router: &Router, name: &str, params: &Params) -> String {
    router
        .url_for(name, params)
        .unwrap_or_else(|e| panic!("Failed to generate {name}: {e}"))
}

/// Generates a URL, expecting an error.
pub fn generate_err(router: &Router, name: &str, params: &Params) -> UrlGenError {
    router
        .url_for(name, params)
        .expect_err(&format!("Expected error generating {name}"))
}
