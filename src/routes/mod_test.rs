use crate::config::Config;
use crate::state::test_helpers;

async fn get(addr: std::net::SocketAddr, path: &str) -> reqwest::Response {
    reqwest::get(format!("http://{addr}{path}"))
        .await
        .expect("request should reach test server")
}

fn content_type(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn index_returns_html_page() {
    let addr = test_helpers::spawn_server(&test_helpers::test_config()).await;

    let resp = get(addr, "/").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/html"));

    let body = resp.text().await.expect("body");
    assert!(body.contains("hsl-indicator"));
    assert!(body.contains("test data"));
}

#[tokio::test]
async fn index_uses_configured_page_data() {
    let config = Config { page_data: "welcome aboard".into(), ..test_helpers::test_config() };
    let addr = test_helpers::spawn_server(&config).await;

    let body = get(addr, "/").await.text().await.expect("body");
    assert!(body.contains("welcome aboard"));
}

#[tokio::test]
async fn static_assets_are_served_from_public_dir() {
    let addr = test_helpers::spawn_server(&test_helpers::test_config()).await;

    let script = get(addr, "/scripts/ui.js").await;
    assert_eq!(script.status(), reqwest::StatusCode::OK);
    assert!(content_type(&script).contains("javascript"));
    let script = script.text().await.expect("body");
    assert!(script.contains("mouse:move"));
    assert!(script.contains("Math.round((100 * numerator) / denominator)"));

    let style = get(addr, "/styles/main.css").await;
    assert_eq!(style.status(), reqwest::StatusCode::OK);
    assert!(content_type(&style).starts_with("text/css"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let addr = test_helpers::spawn_server(&test_helpers::test_config()).await;
    assert_eq!(get(addr, "/nope.txt").await.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthz_reports_broadcast_group_size() {
    let addr = test_helpers::spawn_server(&test_helpers::test_config()).await;

    let resp = get(addr, "/healthz").await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("json body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["clients"], 0);
}
