//! Persistence for member records. Handlers and pipelines only see
//! `MemberStore`; the concrete store is picked once at startup.

mod memory;
mod postgres;

use async_trait::async_trait;
pub use memory::InMemoryMemberStore;
pub use postgres::PgMemberStore;
use uuid::Uuid;

use crate::domain::Member;
use crate::domain::NewMember;
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum StoreError {
    /// The unique constraint on `email` rejected a write
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// A collection of members with at most one record per normalized email.
///
/// Implementations must tolerate concurrent calls from the same request (see
/// `dispatch`), relying on their own concurrency control.
#[async_trait]
pub trait MemberStore: Send + Sync + 'static {
    /// `email` must already be normalized
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, StoreError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Member>, StoreError>;

    /// Assigns the id and both timestamps
    async fn insert(
        &self,
        member: &NewMember,
    ) -> Result<Member, StoreError>;

    /// Persists every mutable field of `member` and bumps `updated_at`.
    /// Returns `Ok(None)` if the member no longer exists.
    async fn update(
        &self,
        member: &Member,
    ) -> Result<Option<Member>, StoreError>;

    /// All members, newest first
    async fn list(&self) -> Result<Vec<Member>, StoreError>;
}
