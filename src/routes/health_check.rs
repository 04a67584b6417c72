use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Touches neither the store nor the mail API, so it stays 200 while either is
/// down.
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
