use actix_web::web;
use actix_web::HttpResponse;
use serde_json::json;

use super::MemberError;
use crate::store::MemberStore;

/// `GET /members`, newest first
#[tracing::instrument(name = "Listing members", skip(store))]
pub async fn list_members(store: web::Data<dyn MemberStore>) -> Result<HttpResponse, MemberError> {
    let members = store.list().await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "totalItems": members.len(),
        "data": members,
    })))
}
