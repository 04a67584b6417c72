use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::MemberStore;
use super::StoreError;
use crate::domain::Member;
use crate::domain::NewMember;

/// Process-local store. Records live in insertion order; uniqueness of `email`
/// is checked under the lock, like a unique index would.
#[derive(Default)]
pub struct InMemoryMemberStore {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize { self.members.lock().await.len() }

    pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

fn email_taken(
    members: &[Member],
    email: &str,
    except: Option<Uuid>,
) -> bool {
    members
        .iter()
        .any(|m| m.email.as_deref() == Some(email) && Some(m.id) != except)
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, StoreError> {
        let members = self.members.lock().await;
        Ok(members
            .iter()
            .find(|m| m.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Member>, StoreError> {
        let members = self.members.lock().await;
        Ok(members.iter().find(|m| m.id == id).cloned())
    }

    async fn insert(
        &self,
        new_member: &NewMember,
    ) -> Result<Member, StoreError> {
        let mut members = self.members.lock().await;
        let email = new_member.email.as_ref().map(|e| e.as_ref().to_string());
        if let Some(email) = &email {
            if email_taken(&members, email, None) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4(),
            name: new_member.name.as_ref().to_string(),
            email,
            state: new_member.state.clone(),
            number: new_member
                .number
                .as_ref()
                .map(|n| n.as_ref().to_string())
                .unwrap_or_default(),
            field: new_member.field.clone(),
            licensed_by: new_member.licensed_by.clone(),
            license_number: new_member.license_number.clone(),
            message: new_member.message.clone(),
            email_sent: new_member.email_sent,
            created_at: now,
            updated_at: now,
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn update(
        &self,
        member: &Member,
    ) -> Result<Option<Member>, StoreError> {
        let mut members = self.members.lock().await;
        if let Some(email) = &member.email {
            if email_taken(&members, email, Some(member.id)) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let Some(stored) = members.iter_mut().find(|m| m.id == member.id) else {
            return Ok(None);
        };
        *stored = Member {
            // neither of these can be changed by the caller
            id: stored.id,
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..member.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn list(&self) -> Result<Vec<Member>, StoreError> {
        let members = self.members.lock().await;
        // reversed first, so that ties in `created_at` are still newest first
        let mut all: Vec<Member> = members.iter().rev().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
