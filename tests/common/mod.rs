#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fit_coach::api::routes::create_routes;
use fit_coach::config::OpenAiConfig;
use fit_coach::services::{OpenAiClient, PlanGenerationService};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "sk-test-key";

/// A reply in the shape models usually send: a fenced JSON array of days
pub fn fenced_week(days: usize) -> String {
    let week: Vec<Value> = (1..=days)
        .map(|n| {
            json!({
                "id": format!("day-{n}"),
                "title": format!("Day {n}: Full Body"),
                "summary": "Strength then conditioning",
                "minutes": 40,
                "focus": ["full body"],
                "tags": ["hybrid"],
                "blocks": [
                    {"kind": "warmup", "text": "Row 500m", "minutes": 5},
                    {"kind": "strength", "text": "Goblet squat 4x8", "minutes": 20,
                     "loadRx": "moderate", "equipment": ["kettlebell"], "coach": "Sit tall"},
                    {"kind": "finisher", "text": "Burpees 3x10", "minutes": 10}
                ]
            })
        })
        .collect();

    format!("```json\n{}\n```", serde_json::to_string_pretty(&week).unwrap())
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub fn openai_config(base_url: &str, api_key: &str) -> OpenAiConfig {
    OpenAiConfig::default()
        .with_api_key(api_key)
        .with_base_url(base_url)
}

pub fn router_for(config: OpenAiConfig) -> Router {
    let client = OpenAiClient::new(config.base_url.clone()).unwrap();
    create_routes(PlanGenerationService::new(config, Arc::new(client)))
}

pub fn short_timeout(config: OpenAiConfig) -> OpenAiConfig {
    config.with_timeout(Duration::from_millis(200))
}

pub async fn post_plan_week(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/functions/v1/plan-week")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
