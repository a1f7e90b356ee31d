use shelf::extractor::{ExtractError, extract};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Borrow Checker Field Notes</title>
    <meta property="og:site_name" content="Systems Weekly">
</head>
<body>
    <nav><a href="/">Home</a> <a href="/archive">Archive</a></nav>
    <article>
        <h1>Borrow Checker Field Notes</h1>
        <p>Ownership is the core idea that makes the language memory safe without
        a garbage collector. Every value has a single owner and the compiler
        tracks where that ownership moves.</p>
        <p>Borrows let code read or mutate a value without taking ownership,
        and the checker enforces that mutable access is exclusive for as long
        as the borrow lives.</p>
        <p>Lifetimes give names to the regions of code where borrows are valid,
        which is what lets the compiler reject dangling references at build
        time rather than at runtime.</p>
    </article>
    <footer>All rights reserved.</footer>
</body>
</html>"#;

async fn serve(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html.as_bytes().to_vec())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn extracts_title_publication_and_text() {
    let server = MockServer::start().await;
    serve(&server, "/notes", ARTICLE_HTML).await;

    let url = format!("{}/notes", server.uri());
    let article = extract(&url).await.unwrap();

    assert_eq!(article.title, "Borrow Checker Field Notes");
    assert_eq!(article.publication_name.as_deref(), Some("Systems Weekly"));
    assert!(article.full_text.contains("single owner"));
    assert!(article.full_text.contains("dangling references"));
    assert_eq!(article.source_url, url);
}

#[tokio::test]
async fn source_url_stays_the_submitted_one_across_redirects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old-slug"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/notes"))
        .mount(&server)
        .await;
    serve(&server, "/notes", ARTICLE_HTML).await;

    let url = format!("{}/old-slug", server.uri());
    let article = extract(&url).await.unwrap();

    assert_eq!(article.source_url, url);
}

#[tokio::test]
async fn page_without_text_is_not_extractable() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/empty",
        "<html><body><img src=\"spa.png\"></body></html>",
    )
    .await;

    let url = format!("{}/empty", server.uri());
    match extract(&url).await {
        Err(ExtractError::NotExtractable) => {}
        other => panic!("expected not-extractable, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failures_surface_as_fetch_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    match extract(&url).await {
        Err(ExtractError::Fetch(_)) => {}
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_urls_fail_before_any_io() {
    match extract("not a url at all").await {
        Err(ExtractError::InvalidUrl(_)) => {}
        other => panic!("expected invalid-url, got {other:?}"),
    }
}
