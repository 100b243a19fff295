//! Tests for leftover parameters in the query string.

mod common;
use common::*;

use oxide_urlgen::{params, ParamValue};
use serde_json::json;

fn routes() -> serde_json::Value {
    json!({
        "article": {"tokens": [["variable", "/", "\\d+", "id"], ["text", "/article"]]},
        "blog": {
            "tokens": [["variable", "/", "\\d+", "page"], ["text", "/blog"]],
            "defaults": {"page": 1}
        },
        "localized": {
            "tokens": [["text", "/welcome"]],
            "hosttokens": [["text", ".example.com"], ["variable", "", "[a-z]{2}", "locale"]]
        }
    })
}

#[test]
fn consumed_params_never_in_query() {
    let router = router(routes(), localhost());
    assert_eq!(
        path(&router, "article", &params! { "id" => 5, "b" => "x", "a" => "y" }),
        "/article/5?b=x&a=y"
    );
}

#[test]
fn trimmed_default_not_in_query() {
    let router = router(routes(), localhost());
    assert_eq!(path(&router, "blog", &params! { "page" => 1, "sort" => "new" }), "/blog?sort=new");
}

#[test]
fn host_params_consumed() {
    let router = router(routes(), localhost());
    assert_eq!(
        path(&router, "localized", &params! { "locale" => "de", "ref" => "mail" }),
        "http://de.example.com/welcome?ref=mail"
    );
}

#[test]
fn spaces_become_plus() {
    let router = router(routes(), localhost());
    assert_eq!(
        path(&router, "article", &params! { "id" => 1, "q" => "hello world" }),
        "/article/1?q=hello+world"
    );
}

#[test]
fn sequences_and_mappings() {
    let router = router(routes(), localhost());
    let params = params! {
        "id" => 1,
        "tags" => vec!["a", "b"],
        "filter" => json!({"status": "open"}),
    };
    assert_eq!(
        path(&router, "article", &params),
        "/article/1?tags%5B%5D=a&tags%5B%5D=b&filter%5Bstatus%5D=open"
    );
}

#[test]
fn lazy_and_null_values() {
    let router = router(routes(), localhost());
    let params = params! {
        "id" => 1,
        "token" => ParamValue::lazy(|| ParamValue::from("s3cr3t")),
        "empty" => ParamValue::Null,
    };
    assert_eq!(path(&router, "article", &params), "/article/1?token=s3cr3t&empty=");
}

#[test]
fn empty_leftovers_add_no_separator() {
    let router = router(routes(), localhost());
    assert_eq!(
        path(&router, "article", &params! { "id" => 1, "tags" => Vec::<String>::new() }),
        "/article/1"
    );
}
