//! Route definitions and the route table.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::token::Token;
use crate::value::ParamValue;

/// Requirement key forcing the scheme of generated URLs.
pub const SCHEME_REQUIREMENT: &str = "_scheme";

/// HTTP request methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// OPTIONS method
    Options,
    /// Any other verb, upper-cased.
    Other(String),
}

impl Method {
    /// Parses a method, keeping unknown verbs.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the method as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Other(verb) => verb,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let verb = String::deserialize(deserializer)?;
        Ok(Self::parse(&verb))
    }
}

/// A compiled route.
///
/// Routes are built once and never change; the builder methods consume the
/// route and return the extended copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    tokens: Vec<Token>,
    #[serde(
        default,
        deserialize_with = "map_or_empty_list",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    defaults: IndexMap<String, ParamValue>,
    #[serde(
        default,
        deserialize_with = "map_or_empty_list",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    requirements: IndexMap<String, ParamValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hosttokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    methods: Vec<Method>,
}

impl Route {
    /// Creates a route from its path tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    /// Adds a default value for a variable.
    #[must_use]
    pub fn default_value(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Adds a requirement.
    #[must_use]
    pub fn requirement(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.requirements.insert(name.into(), value.into());
        self
    }

    /// Sets the host tokens.
    #[must_use]
    pub fn host_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.hosttokens = tokens;
        self
    }

    /// Sets the allowed schemes; the first one is preferred.
    #[must_use]
    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the allowed methods.
    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Path tokens, in prepend order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Host tokens, in prepend order. Empty when the route has no host.
    #[must_use]
    pub fn hosttokens(&self) -> &[Token] {
        &self.hosttokens
    }

    /// Default values by variable name.
    #[must_use]
    pub fn defaults(&self) -> &IndexMap<String, ParamValue> {
        &self.defaults
    }

    /// Requirements by name.
    #[must_use]
    pub fn requirements(&self) -> &IndexMap<String, ParamValue> {
        &self.requirements
    }

    /// Allowed schemes.
    #[must_use]
    pub fn allowed_schemes(&self) -> &[String] {
        &self.schemes
    }

    /// Allowed methods.
    #[must_use]
    pub fn allowed_methods(&self) -> &[Method] {
        &self.methods
    }

    /// Scheme forced by the `_scheme` requirement.
    #[must_use]
    pub fn required_scheme(&self) -> Option<String> {
        self.requirements
            .get(SCHEME_REQUIREMENT)
            .map(ParamValue::to_text)
    }

    /// First allowed scheme.
    #[must_use]
    pub fn preferred_scheme(&self) -> Option<&str> {
        self.schemes.first().map(String::as_str)
    }

    /// Renders the path as a `{name}` template, for display.
    #[must_use]
    pub fn path_template(&self) -> String {
        let template = render_template(&self.tokens);
        if template.is_empty() {
            "/".to_string()
        } else {
            template
        }
    }

    /// Renders the host as a `{name}` template, if the route has one.
    #[must_use]
    pub fn host_template(&self) -> Option<String> {
        (!self.hosttokens.is_empty()).then(|| render_template(&self.hosttokens))
    }
}

fn render_template(tokens: &[Token]) -> String {
    tokens.iter().fold(String::new(), |acc, token| match token {
        Token::Text { pattern } => format!("{pattern}{acc}"),
        Token::Variable { prefix, name, .. } => format!("{prefix}{{{name}}}{acc}"),
    })
}

/// Route exporters write empty maps as `[]`.
fn map_or_empty_list<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, ParamValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(IndexMap<String, ParamValue>),
        List(Vec<Value>),
    }

    match Option::<MapOrList>::deserialize(deserializer)? {
        None => Ok(IndexMap::new()),
        Some(MapOrList::Map(map)) => Ok(map),
        Some(MapOrList::List(list)) if list.is_empty() => Ok(IndexMap::new()),
        Some(MapOrList::List(_)) => Err(de::Error::custom(
            "expected an object or an empty list",
        )),
    }
}

/// Immutable mapping from route name to [`Route`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: IndexMap<String, Route>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a table from a JSON object of routes.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::Json`](crate::UrlGenError::Json) on malformed
    /// input, including unsupported tokens.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a route by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Returns whether a route exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Iterates over `(name, route)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(name, route)| (name.as_str(), route))
    }
}

impl<K: Into<String>> FromIterator<(K, Route)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (K, Route)>>(iter: I) -> Self {
        Self {
            routes: iter
                .into_iter()
                .map(|(name, route)| (name.into(), route))
                .collect(),
        }
    }
}
