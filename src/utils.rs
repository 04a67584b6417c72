use actix_web::error::InternalError;
use actix_web::error::JsonPayloadError;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use serde_json::json;

/// Print an error followed by its full chain of sources. Used for `Debug`
/// impls, so that `tracing-actix-web` logs the root cause of a 500.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

/// The JSON body returned for every failed request
pub fn failure_body(message: &str) -> serde_json::Value {
    json!({
        "success": false,
        "message": message,
    })
}

/// Malformed/mistyped JSON bodies get the same 400 shape as validation errors,
/// instead of actix's plain-text default
pub fn json_error_handler(
    err: JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let resp = HttpResponse::BadRequest().json(failure_body(&err.to_string()));
    InternalError::from_response(err, resp).into()
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse { HttpResponse::NotFound().json(failure_body("Not found")) }
