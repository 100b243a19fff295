//! Route lookup and URL generation.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::context::{Context, LocationProvider};
use crate::encoding::encode_path_value;
use crate::error::{Result, UrlGenError};
use crate::query::build_query;
use crate::route::{Route, RouteTable};
use crate::token::Token;
use crate::value::{ParamValue, Params};

/// Operations a URL generator exposes.
pub trait UrlGenerator {
    /// Returns the route table.
    fn routes(&self) -> &RouteTable;

    /// Returns the base URL prepended to every path.
    fn base_url(&self) -> &str;

    /// Returns the current scheme, lower-cased.
    fn scheme(&self) -> String;

    /// Returns the current host.
    fn host(&self) -> &str;

    /// Looks up a route, trying the prefixed name first.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::RouteNotFound`] if neither name exists.
    fn route(&self, name: &str) -> Result<&Route>;

    /// Generates the URL of a route.
    ///
    /// With `absolute` set, the URL always carries a scheme and a host.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::RouteNotFound`] for an unknown route and
    /// [`UrlGenError::MissingParameter`] when a mandatory variable has no
    /// value.
    fn generate(&self, name: &str, params: &Params, absolute: bool) -> Result<String>;

    /// Generates an absolute URL.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    fn url(&self, name: &str, params: &Params) -> Result<String> {
        self.generate(name, params, true)
    }

    /// Generates a URL without a scheme and host unless the route forces
    /// them.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    fn url_for(&self, name: &str, params: &Params) -> Result<String> {
        self.generate(name, params, false)
    }
}

/// Generates URLs from a frozen route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    context: Context,
    routes: RouteTable,
}

impl Router {
    /// Creates a router with an explicit context.
    #[must_use]
    pub const fn new(routes: RouteTable, context: Context) -> Self {
        Self { context, routes }
    }

    /// Creates a router whose context is derived from the page location.
    ///
    /// The provider is queried once.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error.
    pub fn from_location<P>(routes: RouteTable, provider: &P) -> Result<Self>
    where
        P: LocationProvider + ?Sized,
    {
        let location = provider.location()?;
        debug!(
            host = %location.host,
            path = %location.pathname,
            "derived context from location"
        );
        Ok(Self::new(routes, Context::from_location(&location)))
    }

    /// Returns the context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    fn build_path(
        name: &str,
        route: &Route,
        params: &Params,
        unused: &mut Params,
    ) -> Result<String> {
        let mut url = String::new();
        let mut optional = true;

        for token in route.tokens() {
            match token {
                Token::Text { pattern } => {
                    url.insert_str(0, pattern);
                    optional = false;
                }
                Token::Variable {
                    prefix,
                    name: variable,
                    ..
                } => {
                    let supplied = params.get(variable).map(ParamValue::resolve);
                    let default = route.defaults().get(variable).map(ParamValue::resolve);
                    let overrides_default = match (&supplied, &default) {
                        (Some(value), Some(default)) => !value.loosely_equals(default),
                        _ => false,
                    };

                    if !optional || default.is_none() || overrides_default {
                        let value: Cow<'_, ParamValue> = if let Some(value) = supplied {
                            unused.shift_remove(variable);
                            value
                        } else if let Some(default) = default {
                            default
                        } else if optional {
                            trace!(variable = %variable, "skipped trailing optional variable");
                            continue;
                        } else {
                            return Err(UrlGenError::MissingParameter {
                                route: name.to_string(),
                                parameter: variable.clone(),
                            });
                        };

                        if !value.is_empty_segment() || !optional {
                            let encoded = if value.is_null() {
                                String::new()
                            } else {
                                encode_path_value(&value.to_text())
                            };
                            url.insert_str(0, &encoded);
                            url.insert_str(0, prefix);
                        }

                        trace!(variable = %variable, "emitted variable");
                        optional = false;
                    } else if default.is_some() {
                        unused.shift_remove(variable);
                    }
                }
            }
        }

        if url.is_empty() {
            url.push('/');
        }

        Ok(url)
    }

    fn build_host(
        name: &str,
        route: &Route,
        params: &Params,
        unused: &mut Params,
    ) -> Result<String> {
        let mut host = String::new();

        for token in route.hosttokens() {
            match token {
                Token::Text { pattern } => host.insert_str(0, pattern),
                Token::Variable {
                    prefix,
                    name: variable,
                    ..
                } => {
                    let value = if let Some(value) = params.get(variable) {
                        unused.shift_remove(variable);
                        value
                    } else if let Some(default) = route.defaults().get(variable) {
                        default
                    } else {
                        return Err(UrlGenError::MissingParameter {
                            route: name.to_string(),
                            parameter: variable.clone(),
                        });
                    };

                    host.insert_str(0, &value.to_text());
                    host.insert_str(0, prefix);
                }
            }
        }

        Ok(host)
    }

    /// Picks the scheme and host to put in front of the path, if any.
    fn authority(&self, route: &Route, host: &str, absolute: bool) -> Option<(String, String)> {
        let scheme = self.scheme();
        let host_or_current = || {
            if host.is_empty() {
                self.host().to_string()
            } else {
                host.to_string()
            }
        };

        if let Some(required) = route.required_scheme().filter(|required| *required != scheme) {
            return Some((required, host_or_current()));
        }
        if let Some(preferred) = route.preferred_scheme().filter(|preferred| *preferred != scheme) {
            return Some((preferred.to_string(), host_or_current()));
        }
        if !host.is_empty() && host != self.host() {
            return Some((scheme, host.to_string()));
        }
        if absolute {
            return Some((scheme, self.host().to_string()));
        }
        None
    }
}

impl UrlGenerator for Router {
    fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn base_url(&self) -> &str {
        self.context.base_url()
    }

    fn scheme(&self) -> String {
        self.context.scheme().to_lowercase()
    }

    fn host(&self) -> &str {
        self.context.host()
    }

    fn route(&self, name: &str) -> Result<&Route> {
        let prefixed = format!("{}{name}", self.context.prefix());

        if let Some(route) = self.routes.get(&prefixed) {
            if !self.context.prefix().is_empty() {
                debug!(route = %name, resolved = %prefixed, "resolved prefixed route");
            }
            return Ok(route);
        }

        self.routes
            .get(name)
            .ok_or_else(|| UrlGenError::RouteNotFound(name.to_string()))
    }

    fn generate(&self, name: &str, params: &Params, absolute: bool) -> Result<String> {
        let route = self.route(name)?;
        let mut unused = params.clone();

        let path = Self::build_path(name, route, params, &mut unused)?;
        let host = Self::build_host(name, route, params, &mut unused)?;

        let mut url = format!("{}{path}", self.base_url());

        if let Some((scheme, authority)) = self.authority(route, &host, absolute) {
            url = format!("{scheme}://{authority}{url}");
        }

        let query = build_query(&unused);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        debug!(route = %name, url = %url, "generated url");
        Ok(url)
    }
}
