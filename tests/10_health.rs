mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_default().await?;

    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok", "unexpected body: {}", body);
    assert!(body.get("timestamp").is_some());
    Ok(())
}

#[tokio::test]
async fn root_and_hello_are_public() -> Result<()> {
    let server = common::spawn_default().await?;

    let body = reqwest::get(server.url("/")).await?.json::<Value>().await?;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["message"].is_string());

    let res = reqwest::get(server.url("/api/v1/hello")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Hello, World!");
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_wrong_methods_are_404() -> Result<()> {
    let server = common::spawn_default().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/v1/unknown")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NotFound");

    let res = client.patch(server.url("/api/v1/users/1")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
