#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, clippy::must_use_candidate, unreachable_pub)]
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

mod common;

async fn get_skills(app: &common::TestApp, path: &str) -> Vec<Value> {
    let resp = app.client.get(format!("{}{}", app.server_url, path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_full_skill_list() {
    let app = common::TestApp::spawn().await;

    let skills = get_skills(&app, "/v1/skills").await;

    assert_eq!(skills.len(), 4);
    assert_eq!(skills[0], json!({ "id": 1, "skillName": "Next.js", "level": "Advanced" }));
    assert_eq!(skills[1], json!({ "id": 2, "skillName": "TypeScript", "level": "Intermediate" }));
}

#[tokio::test]
async fn test_legacy_path_serves_same_list() {
    let app = common::TestApp::spawn().await;

    assert_eq!(get_skills(&app, "/api/skills").await, get_skills(&app, "/v1/skills").await);
}

#[tokio::test]
async fn test_skill_pagination() {
    let app = common::TestApp::spawn().await;

    let first = get_skills(&app, "/v1/skills?page=1&per_page=2").await;
    let second = get_skills(&app, "/v1/skills?page=2&per_page=2").await;
    let beyond = get_skills(&app, "/v1/skills?page=5&per_page=2").await;

    let ids = |skills: &[Value]| skills.iter().map(|s| s["id"].as_i64().unwrap()).collect::<Vec<_>>();
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(ids(&second), vec![3, 4]);
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/v1/skills?page=abc", app.server_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_skills_honor_configured_delay() {
    let mut config = common::get_test_config();
    config.skills.delay_ms = 100;
    let app = common::TestApp::spawn_with_config(config).await;

    let start = Instant::now();
    let skills = get_skills(&app, "/v1/skills").await;

    assert_eq!(skills.len(), 4);
    assert!(start.elapsed() >= Duration::from_millis(100));
}
