//! Sending the invitation to a batch of members, one outcome per member.

use futures::future::join_all;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::MemberEmail;
use crate::email_client::EmailClient;
use crate::invitation::first_name;
use crate::invitation::Invitation;
use crate::store::MemberStore;
use crate::store::StoreError;
use crate::utils::error_chain_fmt;

/// A recipient as selected in the admin frontend. `name` and `email` come from
/// the request, not from the stored record. A missing `name` fails that target
/// only, not the whole request.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchTarget {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("Member not found")]
    MemberNotFound,
    #[error("{0}")]
    InvalidRecipient(String),
    #[error("Failed to send email: {0}")]
    GatewayError(#[source] reqwest::Error),
    #[error(transparent)]
    StoreError(#[from] StoreError),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchStatus {
    Success,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub email: String,
    #[serde(flatten)]
    pub status: DispatchStatus,
}

/// Send the invitation to every target concurrently and wait for all of them
/// to settle. A failure is recorded in that target's outcome and never affects
/// the others. Outcomes are in the same order as `targets`.
#[tracing::instrument(name = "Dispatching invitations", skip_all, fields(targets = targets.len()))]
pub async fn dispatch_invitations(
    store: &dyn MemberStore,
    email_client: &EmailClient,
    targets: &[DispatchTarget],
) -> Vec<DispatchOutcome> {
    let sends = targets.iter().map(|target| async move {
        let status = match send_invitation(store, email_client, target).await {
            Ok(()) => DispatchStatus::Success,
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "failed to deliver invitation to {}",
                    target.email
                );
                DispatchStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        DispatchOutcome {
            email: target.email.clone(),
            status,
        }
    });
    join_all(sends).await
}

/// The sent-flag is only set once the mail API has accepted the message.
#[tracing::instrument(
    name = "Sending invitation",
    skip(store, email_client, target),
    fields(member_id = %target.id, member_email = %target.email)
)]
async fn send_invitation(
    store: &dyn MemberStore,
    email_client: &EmailClient,
    target: &DispatchTarget,
) -> Result<(), DispatchError> {
    // an id that can't be parsed can't resolve to a member either
    let id = Uuid::parse_str(target.id.trim()).map_err(|_| DispatchError::MemberNotFound)?;
    let mut member = store
        .find_by_id(id)
        .await?
        .ok_or(DispatchError::MemberNotFound)?;

    if first_name(&target.name).is_empty() {
        return Err(DispatchError::InvalidRecipient(
            "Recipient name is missing".to_string(),
        ));
    }
    let recipient =
        MemberEmail::parse(target.email.clone()).map_err(DispatchError::InvalidRecipient)?;
    let invitation = Invitation::for_name(&target.name);

    email_client
        .send_email(
            &recipient,
            invitation.subject(),
            &invitation.html_body(),
            &invitation.text_body(),
        )
        .await
        .map_err(DispatchError::GatewayError)?;

    member.email_sent = true;
    member.message = invitation.message();
    store
        .update(&member)
        .await?
        .ok_or(DispatchError::MemberNotFound)?;
    Ok(())
}
