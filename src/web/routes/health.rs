use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::database::SharedRegistry;

pub async fn health_handler(State(registry): State<SharedRegistry>) -> Json<Value> {
    Json(json!({ "status": "ok", "activities": registry.len() }))
}
