use actix_web::web;
use actix_web::HttpResponse;
use serde_json::json;

use super::MemberError;
use crate::domain::MemberDraft;
use crate::domain::NewMember;
use crate::store::MemberStore;

/// `POST /members/new`
#[tracing::instrument(
    name = "Adding a new member",
    skip(body, store),
    fields(
        member_email = ?body.email,
        member_name = %body.name,
    )
)]
pub async fn create_member(
    body: web::Json<MemberDraft>,
    store: web::Data<dyn MemberStore>,
) -> Result<HttpResponse, MemberError> {
    let new_member: NewMember = body.into_inner().try_into()?;
    let member = store.insert(&new_member).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": member,
    })))
}
