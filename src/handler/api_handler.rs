use chrono::Utc;
use rocket::serde::json::Json;

use crate::model::response::api_responses::HealthResponse;

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Image folder server is running".to_string(),
        timestamp: Utc::now(),
    })
}
