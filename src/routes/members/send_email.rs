use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;

use crate::dispatch::dispatch_invitations;
use crate::dispatch::DispatchTarget;
use crate::email_client::EmailClient;
use crate::store::MemberStore;

/// Either a bare list of targets or the list wrapped as `{"data": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SendEmailRequest {
    Targets(Vec<DispatchTarget>),
    Wrapped { data: Vec<DispatchTarget> },
}

impl SendEmailRequest {
    fn into_targets(self) -> Vec<DispatchTarget> {
        match self {
            Self::Targets(t) | Self::Wrapped { data: t } => t,
        }
    }
}

/// `PUT /members/send-email`. Always 200; per-recipient failures are reported
/// in `results`.
#[tracing::instrument(name = "Sending invitations", skip_all)]
pub async fn send_invitations(
    body: web::Json<SendEmailRequest>,
    store: web::Data<dyn MemberStore>,
    email_client: web::Data<EmailClient>,
) -> HttpResponse {
    let targets = body.into_inner().into_targets();
    let results = dispatch_invitations(store.get_ref(), &email_client, &targets).await;
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Email process completed",
        "results": results,
    }))
}
