mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{success_flag, TestServer};

const ROSTER: &str = r#"{"students":[
    {"id":"1234567a","rapid":1200,"blitz":1100,"bullet":1000},
    {"id":"7654321b","rapid":1500,"blitz":1000,"bullet":1300}
]}"#;

#[tokio::test]
async fn create_then_fetch_student() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/students"))
        .json(&json!({"id": "5555555c", "rapid": 900, "blitz": 950, "bullet": 1000}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(success_flag(&body), Some(true), "body: {}", body);
    assert_eq!(body["student"]["id"], json!("5555555c"));

    let res = client.get(server.url("/api/students/5555555c")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["student"]["blitz"], json!(950));

    assert_eq!(server.roster_on_disk()?["students"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn create_duplicate_is_conflict() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/students"))
        .json(&json!({"id": "1234567a", "rapid": 1, "blitz": 1, "bullet": 1}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(success_flag(&res.json::<Value>().await?), Some(false));
    Ok(())
}

#[tokio::test]
async fn create_without_ratings_is_bad_request() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/students"))
        .json(&json!({"id": "5555555c"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_ratings_persists() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client
        .put(server.url("/api/students/1234567a"))
        .json(&json!({"rapid": 1250}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["student"],
        json!({"id": "1234567a", "rapid": 1250, "blitz": 1100, "bullet": 1000})
    );

    assert_eq!(server.roster_on_disk()?["students"][0]["rapid"], json!(1250));
    Ok(())
}

#[tokio::test]
async fn fetch_unknown_student_is_404() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/students/0000000z")).send().await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn rankings_default_to_rapid() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/rankings")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["format"], json!("rapid"));
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["rankings"][0]["id"], json!("7654321b"));
    assert_eq!(body["rankings"][0]["rank"], json!(1));

    let res = client.get(server.url("/api/rankings?format=blitz")).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["format"], json!("blitz"));
    assert_eq!(body["rankings"][0]["id"], json!("1234567a"));

    Ok(())
}

#[tokio::test]
async fn malformed_json_body_gets_json_failure() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/students"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(success_flag(&body), Some(false), "body: {}", body);
    assert_eq!(body["code"], json!("BAD_REQUEST"));

    let res = client
        .put(server.url("/api/students/1234567a"))
        .body(r#"{"rapid":1250}"#)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(success_flag(&res.json::<Value>().await?), Some(false));

    assert_eq!(server.roster_on_disk()?["students"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn unknown_rankings_format_gets_json_failure() -> Result<()> {
    let server = TestServer::with_roster(ROSTER).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/rankings?format=classical")).send().await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(success_flag(&body), Some(false), "body: {}", body);
    assert!(body["error"].as_str().is_some_and(|e| e.starts_with("Invalid query")));
    Ok(())
}
