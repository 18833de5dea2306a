use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::orchestrator::RecordFailure;
use crate::{AppState, ErrorResponse};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub generated: Vec<String>,
    pub failed: Vec<RecordFailure>,
}

/// Run one generation batch and report its outcome.
pub async fn generate_documents(state: web::Data<AppState>) -> impl Responder {
    match state.runner.run_report().await {
        Ok(report) => HttpResponse::Ok().json(GenerateResponse {
            message: report.summary(),
            generated: report.generated,
            failed: report.failed,
        }),
        Err(e) => {
            log::error!("Document generation aborted: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/authorizations/generate").route(web::post().to(generate_documents)),
    )
    .service(web::resource("/health").route(web::get().to(health)));
}
