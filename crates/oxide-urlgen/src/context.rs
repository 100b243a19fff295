//! Ambient context of URL generation.
//!
//! A [`Context`] carries the base URL, the route name prefix, and the host
//! and scheme of the page generating URLs. It is either given explicitly or
//! derived once from a [`LocationProvider`] when the router is built.

use url::Url;

use crate::error::{Result, UrlGenError};

/// Environment the router generates URLs for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    base_url: String,
    prefix: String,
    host: String,
    scheme: String,
}

impl Context {
    /// Creates a context with every field empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL prepended to every path.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the name prefix tried first on lookup.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the current host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the current scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Derives a context from the page location.
    ///
    /// The path becomes the name prefix and the protocol, without its
    /// trailing colon, becomes the scheme.
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        let scheme = location
            .protocol
            .strip_suffix(':')
            .unwrap_or(&location.protocol);

        Self {
            base_url: String::new(),
            prefix: location.pathname.clone(),
            host: location.host.clone(),
            scheme: scheme.to_string(),
        }
    }

    /// Base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Current host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Current scheme, as given.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

/// Location of the page generating URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Host, with the port when it is not the default one.
    pub host: String,
    /// Path of the page.
    pub pathname: String,
    /// Scheme followed by `:`.
    pub protocol: String,
}

impl Location {
    /// Parses an absolute href. One trailing slash is dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::InvalidLocation`] if the href is not an
    /// absolute URL.
    pub fn parse(href: &str) -> Result<Self> {
        let trimmed = href.strip_suffix('/').unwrap_or(href);
        let url = Url::parse(trimmed).map_err(|source| UrlGenError::InvalidLocation {
            href: href.to_string(),
            source,
        })?;

        let mut host = url.host_str().unwrap_or_default().to_string();
        if let Some(port) = url.port() {
            host.push_str(&format!(":{port}"));
        }

        Ok(Self {
            host,
            pathname: url.path().to_string(),
            protocol: format!("{}:", url.scheme()),
        })
    }
}

/// Source of the current page location.
pub trait LocationProvider {
    /// Returns the current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn location(&self) -> Result<Location>;
}

impl LocationProvider for Location {
    fn location(&self) -> Result<Location> {
        Ok(self.clone())
    }
}

impl LocationProvider for str {
    fn location(&self) -> Result<Location> {
        Location::parse(self)
    }
}

impl LocationProvider for String {
    fn location(&self) -> Result<Location> {
        Location::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let context = Context::new()
            .with_base_url("/app_dev.php")
            .with_prefix("en__RG__")
            .with_host("example.com")
            .with_scheme("https");
        assert_eq!(context.base_url(), "/app_dev.php");
        assert_eq!(context.prefix(), "en__RG__");
        assert_eq!(context.host(), "example.com");
        assert_eq!(context.scheme(), "https");
    }

    #[test]
    fn test_parse_location() {
        let location = Location::parse("https://example.com:8443/admin/").unwrap();
        assert_eq!(location.host, "example.com:8443");
        assert_eq!(location.pathname, "/admin");
        assert_eq!(location.protocol, "https:");
    }

    #[test]
    fn test_parse_location_default_port() {
        let location = Location::parse("http://example.com:80/shop?page=2").unwrap();
        assert_eq!(location.host, "example.com");
        assert_eq!(location.pathname, "/shop");
    }

    #[test]
    fn test_parse_relative_location() {
        let err = Location::parse("/relative/path").unwrap_err();
        assert!(matches!(err, UrlGenError::InvalidLocation { .. }));
    }

    #[test]
    fn test_context_from_location() {
        let context = Context::from_location(&Location {
            host: "localhost:8000".to_string(),
            pathname: "/blog".to_string(),
            protocol: "http:".to_string(),
        });
        assert_eq!(context.base_url(), "");
        assert_eq!(context.prefix(), "/blog");
        assert_eq!(context.host(), "localhost:8000");
        assert_eq!(context.scheme(), "http");
    }

    #[test]
    fn test_string_provider() {
        let location = "https://example.org/docs".location().unwrap();
        assert_eq!(location.pathname, "/docs");
    }
}
