pub mod character;
pub mod dialogue;
pub mod script;
pub mod uploaded;
pub mod video;

use axum::Json;
use serde_json::{Value, json};

/// Landing message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Character Generator API" }))
}
