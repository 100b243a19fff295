//! Query string serialization of leftover parameters.

use crate::encoding::encode_component;
use crate::value::{ParamValue, Params};

/// Builds the query string for `params`, without the leading `?`.
///
/// Sequences and mappings flatten into bracketed keys, keys and values are
/// component-encoded and encoded spaces become `+`.
#[must_use]
pub fn build_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key, value, &mut |key: &str, value: &ParamValue| {
            pairs.push(format!(
                "{}={}",
                encode_component(key),
                encode_component(&scalar_text(value))
            ));
        });
    }
    pairs.join("&").replace("%20", "+")
}

fn scalar_text(value: &ParamValue) -> String {
    if value.is_null() {
        String::new()
    } else {
        value.to_text()
    }
}

/// Walks `value` and calls `add` for each scalar, with its full key.
fn flatten(prefix: &str, value: &ParamValue, add: &mut dyn FnMut(&str, &ParamValue)) {
    match &*value.resolve() {
        ParamValue::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                let item = item.resolve();
                if prefix.ends_with("[]") {
                    add(prefix, &item);
                } else if matches!(*item, ParamValue::Sequence(_) | ParamValue::Mapping(_)) {
                    flatten(&format!("{prefix}[{index}]"), &item, add);
                } else {
                    flatten(&format!("{prefix}[]"), &item, add);
                }
            }
        }
        ParamValue::Mapping(map) => {
            for (name, item) in map {
                flatten(&format!("{prefix}[{name}]"), item, add);
            }
        }
        scalar => add(prefix, scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_scalars() {
        let query = build_query(&params! { "page" => 2, "q" => "rust lang", "draft" => false });
        assert_eq!(query, "page=2&q=rust+lang&draft=false");
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(build_query(&params! { "filter" => ParamValue::Null }), "filter=");
    }

    #[test]
    fn test_scalar_sequence() {
        assert_eq!(
            build_query(&params! { "tags" => vec!["a", "b"] }),
            "tags%5B%5D=a&tags%5B%5D=b"
        );
    }

    #[test]
    fn test_bracketed_prefix_passthrough() {
        assert_eq!(
            build_query(&params! { "ids[]" => vec![1, 2] }),
            "ids%5B%5D=1&ids%5B%5D=2"
        );
    }

    #[test]
    fn test_nested_sequences_are_indexed() {
        let params = params! { "matrix" => json!([[1, 2], {"x": 3}]) };
        assert_eq!(
            build_query(&params),
            "matrix%5B0%5D%5B%5D=1&matrix%5B0%5D%5B%5D=2&matrix%5B1%5D%5Bx%5D=3"
        );
    }

    #[test]
    fn test_mapping() {
        let params = params! { "filter" => json!({"status": "open", "owner": {"id": 7}}) };
        assert_eq!(
            build_query(&params),
            "filter%5Bstatus%5D=open&filter%5Bowner%5D%5Bid%5D=7"
        );
    }

    #[test]
    fn test_lazy_value() {
        let params = params! {
            "token" => ParamValue::lazy(|| ParamValue::from("abc")),
            "empty" => ParamValue::lazy(|| ParamValue::Null),
        };
        assert_eq!(build_query(&params), "token=abc&empty=");
    }

    #[test]
    fn test_lazy_sequence_element_evaluated_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let params = params! {
            "ids" => ParamValue::Sequence(vec![ParamValue::lazy(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                ParamValue::from(vec![1, 2])
            })]),
        };
        assert_eq!(
            build_query(&params),
            "ids%5B0%5D%5B%5D=1&ids%5B0%5D%5B%5D=2"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_sequence_adds_nothing() {
        assert_eq!(build_query(&params! { "tags" => Vec::<String>::new() }), "");
    }
}
