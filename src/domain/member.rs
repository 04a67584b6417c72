use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// The invitation attached to a member. Rewritten on every successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl Message {
    /// Overwrite whichever of `subject`/`body` is given, keeping the other.
    pub fn merge(
        &mut self,
        subject: Option<String>,
        body: Option<String>,
    ) {
        if let Some(subject) = subject {
            self.subject = subject;
        }
        if let Some(body) = body {
            self.body = body;
        }
    }
}

/// A persisted member. Field names on the wire follow the admin frontend
/// (`_id`, `licensedBy`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    /// Always normalized; `None` only for members created without one
    pub email: Option<String>,
    pub state: String,
    /// Phone number
    pub number: String,
    /// Practice field, e.g. "Mediation"
    pub field: String,
    pub licensed_by: String,
    pub license_number: String,
    pub message: Message,
    #[serde(rename = "email_sent")]
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
