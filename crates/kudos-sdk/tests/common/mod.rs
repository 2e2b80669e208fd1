//! In-process stand-in for the places proxy.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Arc<dyn Fn(&str) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct StubState {
    respond: Responder,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    place_ids: Arc<Mutex<Vec<String>>>,
}

/// Running stub proxy
pub struct StubProxy {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    place_ids: Arc<Mutex<Vec<String>>>,
}

impl StubProxy {
    /// Number of requests served to /api/google-places
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// place_id query parameters received, in order
    pub fn place_ids(&self) -> Vec<String> {
        self.place_ids.lock().unwrap().clone()
    }
}

/// Start a stub answering every place with the same status and body
pub async fn spawn_places_stub(status: StatusCode, body: Value) -> StubProxy {
    spawn_places_stub_with(move |_| (status, body.clone())).await
}

/// Start a stub whose answer depends on the requested place id
pub async fn spawn_places_stub_with<F>(respond: F) -> StubProxy
where
    F: Fn(&str) -> (StatusCode, Value) + Send + Sync + 'static,
{
    spawn_slow_places_stub_with(Duration::ZERO, respond).await
}

/// Start a stub that waits `delay` before answering every place the same way
pub async fn spawn_slow_places_stub(delay: Duration, status: StatusCode, body: Value) -> StubProxy {
    spawn_slow_places_stub_with(delay, move |_| (status, body.clone())).await
}

async fn spawn_slow_places_stub_with<F>(delay: Duration, respond: F) -> StubProxy
where
    F: Fn(&str) -> (StatusCode, Value) + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let place_ids = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        respond: Arc::new(respond),
        delay,
        hits: hits.clone(),
        place_ids: place_ids.clone(),
    };

    let app = Router::new()
        .route("/api/google-places", get(places))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubProxy {
        base_url: format!("http://{}", addr),
        hits,
        place_ids,
    }
}

async fn places(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let place_id = params.get("place_id").cloned().unwrap_or_default();
    state.place_ids.lock().unwrap().push(place_id.clone());
    tokio::time::sleep(state.delay).await;
    let (status, body) = (state.respond)(&place_id);
    (status, Json(body))
}

/// Provider "OK" body with `count` reviews named "Reviewer 0", "Reviewer 1", ...
pub fn ok_body(business: &str, count: usize) -> Value {
    let reviews: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "author_name": format!("Reviewer {}", i),
                "rating": 5,
                "time": 1_700_000_000 + i as i64,
                "text": format!("Review number {}", i),
                "profile_photo_url": format!("https://lh3.googleusercontent.com/a/{}", i),
                "relative_time_description": "a month ago"
            })
        })
        .collect();

    json!({
        "status": "OK",
        "result": {
            "name": business,
            "rating": 4.9,
            "reviews": reviews
        }
    })
}
