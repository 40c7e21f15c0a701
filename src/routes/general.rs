use actix_web::{HttpRequest, HttpResponse};

/// GET /general/welcome
pub async fn welcome(req: HttpRequest) -> HttpResponse {
    tracing::info!("Request received: {} {}", req.method(), req.path());
    HttpResponse::Ok().json(serde_json::json!({ "message": "Welcome to the AuthFlow API!" }))
}

/// GET /health_check
pub async fn health_check() -> HttpResponse {
    tracing::debug!("Health check endpoint called");
    HttpResponse::Ok().finish()
}
