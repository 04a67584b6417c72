//! Bulk import of members from spreadsheet rows, skipping rows whose email is
//! missing or already known.

use std::fmt::Display;

use crate::domain::normalize_email;
use crate::domain::Member;
use crate::domain::MemberDraft;
use crate::domain::NewMember;
use crate::invitation::Invitation;
use crate::spreadsheet::Row;
use crate::store::MemberStore;
use crate::store::StoreError;

/// Practice field of imported members whose sheet has no `field` column
pub const DEFAULT_FIELD: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
    DuplicateEmail,
    ValidationError(String),
}

impl Display for SkipReason {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::MissingEmail => write!(f, "Missing email"),
            Self::DuplicateEmail => write!(f, "Email already exists"),
            Self::ValidationError(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug)]
pub enum RowOutcome {
    Inserted(Member),
    Skipped {
        draft: MemberDraft,
        reason: SkipReason,
    },
}

/// One outcome per input row, in input order
#[derive(Debug, Default)]
pub struct IngestionReport {
    pub outcomes: Vec<RowOutcome>,
}

impl IngestionReport {
    pub fn inserted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Inserted(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize { self.total_count() - self.inserted_count() }

    pub fn total_count(&self) -> usize { self.outcomes.len() }

    /// `(1-based row number, draft, reason)` for every skipped row
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &MemberDraft, &SkipReason)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| match o {
                RowOutcome::Skipped { draft, reason } => Some((i + 1, draft, reason)),
                RowOutcome::Inserted(_) => None,
            })
    }

    pub fn summary(&self) -> String {
        format!(
            "Inserted {} rows, Skipped {} rows, Out of {}",
            self.inserted_count(),
            self.skipped_count(),
            self.total_count()
        )
    }
}

/// Build a candidate member from a spreadsheet row. Columns that are absent
/// get a default; columns that are present but blank stay blank. Every value
/// is trimmed, and the same generic invitation is attached to every row.
pub fn draft_from_row(row: &Row) -> MemberDraft {
    let get = |key: &str, default: &str| {
        row.get(key)
            .map(String::as_str)
            .unwrap_or(default)
            .trim()
            .to_string()
    };

    let email = get("email", "");
    MemberDraft {
        name: get("name", ""),
        email: (!email.is_empty()).then_some(email),
        state: get("state", ""),
        number: get("number", ""),
        field: get("field", DEFAULT_FIELD),
        licensed_by: get("licensedBy", ""),
        license_number: get("licenseNumber", ""),
        message: Invitation::generic().message(),
        email_sent: false,
    }
}

/// Insert every row whose email is not yet in `store`.
///
/// Rows are handled strictly one after another, so a row repeating an email
/// seen earlier in the same batch is skipped as a duplicate. The batch is not
/// transactional: if the store fails, the error is returned and rows inserted
/// so far stay inserted.
#[tracing::instrument(name = "Ingesting member rows", skip_all, fields(rows = rows.len()))]
pub async fn ingest_rows(
    store: &dyn MemberStore,
    rows: &[Row],
) -> Result<IngestionReport, StoreError> {
    let mut report = IngestionReport::default();
    for row in rows {
        let outcome = ingest_draft(store, draft_from_row(row)).await?;
        if let RowOutcome::Skipped { draft, reason } = &outcome {
            tracing::info!(
                member_name = %draft.name,
                member_email = ?draft.email,
                "skipping row: {reason}"
            );
        }
        report.outcomes.push(outcome);
    }
    tracing::info!("{}", report.summary());
    Ok(report)
}

async fn ingest_draft(
    store: &dyn MemberStore,
    mut draft: MemberDraft,
) -> Result<RowOutcome, StoreError> {
    let email = normalize_email(draft.email.as_deref().unwrap_or_default());
    if email.is_empty() {
        return Ok(RowOutcome::Skipped {
            draft,
            reason: SkipReason::MissingEmail,
        });
    }

    if store.find_by_email(&email).await?.is_some() {
        return Ok(RowOutcome::Skipped {
            draft,
            reason: SkipReason::DuplicateEmail,
        });
    }

    draft.email = Some(email);
    let new_member = match NewMember::try_from(draft.clone()) {
        Ok(m) => m,
        Err(e) => {
            return Ok(RowOutcome::Skipped {
                draft,
                reason: SkipReason::ValidationError(e.to_string()),
            })
        }
    };

    match store.insert(&new_member).await {
        Ok(member) => Ok(RowOutcome::Inserted(member)),
        // lost a race with a concurrent insert of the same email
        Err(StoreError::DuplicateEmail(_)) => Ok(RowOutcome::Skipped {
            draft,
            reason: SkipReason::DuplicateEmail,
        }),
        Err(e) => Err(e),
    }
}
