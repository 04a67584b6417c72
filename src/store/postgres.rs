use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::MemberStore;
use super::StoreError;
use crate::domain::Member;
use crate::domain::Message;
use crate::domain::NewMember;

/// `members` table, see `migrations/`. `PgPool` is cheap to clone and hands
/// out one connection per query, so concurrent calls need no extra locking.
#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

/// Flat row; the message is stored as two columns
#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    state: String,
    number: String,
    field: String,
    licensed_by: String,
    license_number: String,
    message_subject: String,
    message_body: String,
    email_sent: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            state: r.state,
            number: r.number,
            field: r.field,
            licensed_by: r.licensed_by,
            license_number: r.license_number,
            message: Message {
                subject: r.message_subject,
                body: r.message_body,
            },
            email_sent: r.email_sent,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Turn a unique violation into `DuplicateEmail`; the only unique index on
/// `members` besides the primary key is on `email`.
fn write_error(
    e: sqlx::Error,
    email: Option<&str>,
    context: &'static str,
) -> StoreError {
    if let (sqlx::Error::Database(db), Some(email)) = (&e, email) {
        if db.is_unique_violation() {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::UnexpectedError(anyhow::Error::new(e).context(context))
}

#[async_trait]
impl MemberStore for PgMemberStore {
    #[tracing::instrument(name = "Looking up member by email", skip(self))]
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up member by email")?;
        Ok(row.map(Member::from))
    }

    #[tracing::instrument(name = "Looking up member by id", skip(self))]
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up member by id")?;
        Ok(row.map(Member::from))
    }

    #[tracing::instrument(
        name = "INSERTing new member into db",
        skip(self, member),
        fields(member_name = %member.name.as_ref())
    )]
    async fn insert(
        &self,
        member: &NewMember,
    ) -> Result<Member, StoreError> {
        let email = member.email.as_ref().map(|e| e.as_ref());
        let now = Utc::now();
        sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (
                id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(member.name.as_ref())
        .bind(email)
        .bind(&member.state)
        .bind(member.number.as_ref().map(|n| n.as_ref()).unwrap_or_default())
        .bind(&member.field)
        .bind(&member.licensed_by)
        .bind(&member.license_number)
        .bind(&member.message.subject)
        .bind(&member.message.body)
        .bind(member.email_sent)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map(Member::from)
        .map_err(|e| write_error(e, email, "Failed to insert member"))
    }

    #[tracing::instrument(name = "UPDATEing member", skip(self, member), fields(member_id = %member.id))]
    async fn update(
        &self,
        member: &Member,
    ) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            UPDATE members
            SET
                name = $2,
                email = $3,
                state = $4,
                number = $5,
                field = $6,
                licensed_by = $7,
                license_number = $8,
                message_subject = $9,
                message_body = $10,
                email_sent = $11,
                updated_at = $12
            WHERE id = $1
            RETURNING id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(member.email.as_deref())
        .bind(&member.state)
        .bind(&member.number)
        .bind(&member.field)
        .bind(&member.licensed_by)
        .bind(&member.license_number)
        .bind(&member.message.subject)
        .bind(&member.message.body)
        .bind(member.email_sent)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, member.email.as_deref(), "Failed to update member"))?;
        Ok(row.map(Member::from))
    }

    #[tracing::instrument(name = "Listing members", skip(self))]
    async fn list(&self) -> Result<Vec<Member>, StoreError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, email, state, number, field, licensed_by, license_number,
                message_subject, message_body, email_sent, created_at, updated_at
            FROM members
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list members")?;
        Ok(rows.into_iter().map(Member::from).collect())
    }
}
