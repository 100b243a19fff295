//! Generates a few URLs for a small blog.
//!
//! Run with: `cargo run -p oxide-urlgen --example blog_urls`

use oxide_urlgen::{Context, ParamValue, Route, RouteTable, Router, Token, UrlGenerator, params};

fn main() -> oxide_urlgen::Result<()> {
    let routes: RouteTable = [
        ("home", Route::new(vec![Token::text("/")])),
        (
            "blog",
            Route::new(vec![Token::variable("/", "\\d+", "page"), Token::text("/blog")])
                .default_value("page", 1),
        ),
        (
            "post",
            Route::new(vec![
                Token::variable("/", "[^/]+", "slug"),
                Token::text("/blog/post"),
            ]),
        ),
        (
            "login",
            Route::new(vec![Token::text("/login")]).requirement("_scheme", "https"),
        ),
    ]
    .into_iter()
    .collect();

    let context = Context::new().with_scheme("http").with_host("blog.example.com");
    let router = Router::new(routes, context);

    println!("{}", router.url("home", &params!())?);
    println!("{}", router.url_for("blog", &params!())?);
    println!("{}", router.url_for("blog", &params! { "page" => 4 })?);
    println!(
        "{}",
        router.url_for(
            "post",
            &params! {
                "slug" => "hello-world",
                "utm" => ParamValue::from_iter([("source", "feed"), ("medium", "rss")]),
            }
        )?
    );
    println!("{}", router.url_for("login", &params!())?);

    Ok(())
}
