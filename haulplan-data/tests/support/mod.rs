//! In-process stand-in for the trip-planning service.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tokio::net::TcpListener;

/// Canned reply served by the stand-in.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct ServiceState {
    reply: Reply,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

/// Handle to a running stand-in.
pub struct Service {
    pub base_url: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Service {
    /// Request bodies received so far.
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().expect("received lock").clone()
    }
}

async fn handle_trip(
    State(state): State<ServiceState>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state.received.lock().expect("received lock").push(body);
    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }
    (state.reply.status, state.reply.body.clone())
}

/// Serve `reply` on an ephemeral local port.
pub async fn spawn_service(reply: Reply) -> Service {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServiceState {
        reply,
        received: Arc::clone(&received),
    };
    let app = Router::new()
        .route("/api/trip/", post(handle_trip))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Service {
        base_url: format!("http://{addr}"),
        received,
    }
}

/// A local URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}

/// A well-formed success body for a 925.4 mile trip over one day.
pub const SUCCESS_BODY: &str = r#"{
    "success": true,
    "logs": [{
        "day": 1,
        "entries": [
            {"activity": "off_duty", "duration": 6.0, "color": "gray"},
            {"activity": "on_duty", "duration": 1.0, "color": "yellow"},
            {"activity": "driving", "duration": 11.0, "color": "green"},
            {"activity": "sleeper_berth", "duration": 6.0, "color": "blue"}
        ],
        "total_driving": 11.0,
        "total_on_duty": 1.0,
        "total_sleeper": 6.0,
        "total_off_duty": 6.0
    }],
    "route": {
        "route_points": [[41.88, -87.63], [38.63, -90.2], [32.78, -96.8]],
        "total_distance": 925.4
    }
}"#;
