use std::fs;
use std::time::Duration;

use docgen_export::{
    ExportError, ExportOptions, FailureKind, Host, HttpHost, HttpHostSettings, StaticExporter,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    docgen_logging::initialize_for_tests();
}

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn routes(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| r.to_string()).collect()
}

#[tokio::test]
async fn fetch_returns_status_and_body() {
    init_logging();
    let server = MockServer::start().await;
    mount(
        &server,
        "/doc",
        ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
    )
    .await;

    let host = HttpHost::new(&server.uri(), routes(&["/doc"]), HttpHostSettings::default()).unwrap();
    let response = host.fetch("/doc").await.expect("fetch ok");

    assert!(response.is_success());
    assert_eq!(response.status, 200);
    assert_eq!(&response.body[..], b"<html>ok</html>");
    assert_eq!(host.paths(), routes(&["/doc"]));
}

#[tokio::test]
async fn fetch_reports_http_status_without_failing() {
    init_logging();
    let server = MockServer::start().await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;

    let host = HttpHost::new(&server.uri(), Vec::new(), HttpHostSettings::default()).unwrap();
    let response = host.fetch("/missing").await.unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn fetch_times_out_on_slow_response() {
    init_logging();
    let server = MockServer::start().await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_string("slow"),
    )
    .await;

    let settings = HttpHostSettings {
        request_timeout: Duration::from_millis(50),
        ..HttpHostSettings::default()
    };
    let host = HttpHost::new(&server.uri(), Vec::new(), settings).unwrap();

    let err = host.fetch("/slow").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn mirrors_a_running_site() {
    init_logging();
    let server = MockServer::start().await;
    mount(&server, "/", ResponseTemplate::new(200).set_body_string("home")).await;
    mount(&server, "/404", ResponseTemplate::new(200).set_body_string("not found page")).await;
    mount(
        &server,
        "/resources/logo.png",
        ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("site");
    let host = HttpHost::new(
        &server.uri(),
        routes(&["/", "/404", "/resources/logo.png"]),
        HttpHostSettings::default(),
    )
    .unwrap();

    let summary = StaticExporter::new(ExportOptions { concurrency: 2 })
        .export(&host, &dest)
        .await
        .unwrap();

    assert_eq!(summary.files_written, 3);
    assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "home");
    assert_eq!(fs::read_to_string(dest.join("404")).unwrap(), "not found page");
    assert_eq!(
        fs::read(dest.join("resources").join("logo.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G']
    );
}

#[tokio::test]
async fn broken_route_fails_the_export() {
    init_logging();
    let server = MockServer::start().await;
    mount(&server, "/", ResponseTemplate::new(200).set_body_string("home")).await;
    mount(&server, "/broken", ResponseTemplate::new(503)).await;

    let temp = TempDir::new().unwrap();
    let host = HttpHost::new(
        &server.uri(),
        routes(&["/", "/broken"]),
        HttpHostSettings::default(),
    )
    .unwrap();

    let err = StaticExporter::default()
        .export(&host, temp.path())
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExportError::FetchFailed { ref path, status: 503 } if path == "/broken"),
        "unexpected error {err:?}"
    );
}

#[tokio::test]
async fn file_names_with_reserved_characters_are_fetched_verbatim() {
    init_logging();
    let server = MockServer::start().await;
    mount(
        &server,
        "/resources/a%231.png",
        ResponseTemplate::new(200).set_body_string("hash"),
    )
    .await;
    mount(&server, "/resources/a", ResponseTemplate::new(200).set_body_string("wrong")).await;

    let temp = TempDir::new().unwrap();
    let host = HttpHost::new(
        &server.uri(),
        routes(&["/resources/a#1.png"]),
        HttpHostSettings::default(),
    )
    .unwrap();

    let response = host.fetch("/resources/a#1.png").await.unwrap();
    assert_eq!(&response.body[..], b"hash");

    StaticExporter::default()
        .export(&host, temp.path())
        .await
        .unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join("resources").join("a#1.png")).unwrap(),
        "hash"
    );
}
