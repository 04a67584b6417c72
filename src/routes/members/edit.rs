use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::MemberError;
use crate::domain::MemberEmail;
use crate::store::MemberStore;

/// Every field is optional; absent or empty fields are left as they are
#[derive(Debug, Deserialize)]
pub struct MemberEdit {
    email: Option<String>,
    subject: Option<String>,
    body: Option<String>,
}

/// `PUT /members/edit/{id}`
#[tracing::instrument(name = "Editing member", skip(edit, store), fields(member_id = %id))]
pub async fn edit_member(
    id: web::Path<String>,
    edit: web::Json<MemberEdit>,
    store: web::Data<dyn MemberStore>,
) -> Result<HttpResponse, MemberError> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| MemberError::NotFound)?;
    let mut member = store.find_by_id(id).await?.ok_or(MemberError::NotFound)?;
    let MemberEdit {
        email,
        subject,
        body,
    } = edit.into_inner();

    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        let email = MemberEmail::parse(email).map_err(MemberError::ValidationError)?;
        if let Some(holder) = store.find_by_email(email.as_ref()).await? {
            if holder.id != member.id {
                return Err(MemberError::ValidationError(format!(
                    "Email already exists: {email}"
                )));
            }
        }
        member.email = Some(email.as_ref().to_string());
    }

    member.message.merge(
        subject.filter(|s| !s.is_empty()),
        body.filter(|b| !b.is_empty()),
    );

    let member = store.update(&member).await?.ok_or(MemberError::NotFound)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Member updated successfully",
        "data": member,
    })))
}
