//! # oxide-urlgen
//!
//! Client-side URL generation from exported route tables.
//!
//! A server-side router compiles each named route into tokens and exports
//! them. This crate rebuilds URLs from those tokens, so front-end code never
//! hardcodes a path.
//!
//! This crate provides:
//! - Route tables loaded from JSON dumps
//! - Path and host generation with defaults and trailing optional segments
//! - Scheme and host resolution (`_scheme` requirement, allowed schemes)
//! - Query strings for parameters the route does not use
//!
//! ## Quick Start
//!
//! ```
//! use oxide_urlgen::{params, Context, Route, Router, Token, UrlGenerator};
//!
//! let routes = [(
//!     "article",
//!     Route::new(vec![
//!         Token::variable("/", "\\d+", "id"),
//!         Token::text("/article"),
//!     ]),
//! )]
//! .into_iter()
//! .collect();
//!
//! let context = Context::new().with_scheme("https").with_host("example.com");
//! let router = Router::new(routes, context);
//!
//! let url = router.url_for("article", &params! { "id" => 5, "ref" => "home" }).unwrap();
//! assert_eq!(url, "/article/5?ref=home");
//!
//! let url = router.url("article", &params! { "id" => 5 }).unwrap();
//! assert_eq!(url, "https://example.com/article/5");
//! ```
//!
//! ## Routing Dumps
//!
//! ```
//! use oxide_urlgen::{params, Router, RoutingData, UrlGenerator};
//!
//! let data = RoutingData::from_json(r#"{
//!     "base_url": "",
//!     "routes": {"blog": {"tokens": [["variable", "/", "\\d+", "page"], ["text", "/blog"]],
//!                         "defaults": {"page": 1}}},
//!     "host": "example.com",
//!     "scheme": "http"
//! }"#).unwrap();
//! let router = Router::from(data);
//!
//! assert_eq!(router.url_for("blog", &params!()).unwrap(), "/blog");
//! assert_eq!(router.url_for("blog", &params! { "page" => 3 }).unwrap(), "/blog/3");
//! ```

mod context;
mod dump;
mod encoding;
mod error;
mod query;
mod route;
mod router;
mod token;
mod value;

pub use context::{Context, Location, LocationProvider};
pub use dump::RoutingData;
pub use encoding::{encode_component, encode_path_value};
pub use error::{Result, UrlGenError};
pub use query::build_query;
pub use route::{Method, Route, RouteTable, SCHEME_REQUIREMENT};
pub use router::{Router, UrlGenerator};
pub use token::{Token, TokenType};
pub use value::{LazyFn, ParamValue, Params};
