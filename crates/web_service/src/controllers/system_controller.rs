use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::server::AppState;

#[get("/health")]
pub async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "sessions": app_state.sessions.len().await,
        "history_enabled": app_state.history.is_some(),
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
