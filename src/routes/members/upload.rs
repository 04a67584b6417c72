use actix_multipart::Multipart;
use actix_web::web;
use actix_web::HttpResponse;
use anyhow::Context;
use futures::TryStreamExt;
use serde::Serialize;
use serde_json::json;

use super::MemberError;
use crate::ingestion::ingest_rows;
use crate::ingestion::IngestionReport;
use crate::ingestion::RowOutcome;
use crate::spreadsheet::parse_first_sheet;
use crate::store::MemberStore;

/// Multipart field carrying the spreadsheet
const FILE_FIELD: &str = "excel_file";

#[derive(Serialize)]
struct SkippedRow<'a> {
    row: usize,
    name: &'a str,
    email: Option<&'a str>,
    reason: String,
}

/// `POST /members/excel-upload`
#[tracing::instrument(name = "Importing members from spreadsheet", skip(payload, store))]
pub async fn upload_members(
    payload: Multipart,
    store: web::Data<dyn MemberStore>,
) -> Result<HttpResponse, MemberError> {
    let buf = read_file_field(payload)
        .await?
        .ok_or_else(|| MemberError::BadUpload("No file uploaded".to_string()))?;

    let sheet = parse_first_sheet(&buf)?;
    tracing::info!(
        sheet = %sheet.sheet_name,
        headers = ?sheet.headers,
        "parsed {} rows",
        sheet.data.len()
    );
    if sheet.data.is_empty() {
        return Err(MemberError::BadUpload("Excel file is empty".to_string()));
    }

    let report = ingest_rows(store.get_ref(), &sheet.data)
        .await
        .context("Failed to store imported members")?;
    Ok(HttpResponse::Ok().json(report_body(&report)))
}

/// Contents of the first `excel_file` field; other fields are drained and
/// ignored
async fn read_file_field(mut payload: Multipart) -> Result<Option<Vec<u8>>, MemberError> {
    let mut file = None;
    while let Some(mut field) = payload.try_next().await.map_err(bad_upload)? {
        let wanted = file.is_none() && field.content_disposition().get_name() == Some(FILE_FIELD);
        let mut buf = vec![];
        while let Some(chunk) = field.try_next().await.map_err(bad_upload)? {
            if wanted {
                buf.extend_from_slice(&chunk);
            }
        }
        if wanted {
            file = Some(buf);
        }
    }
    Ok(file)
}

fn bad_upload(e: actix_multipart::MultipartError) -> MemberError { MemberError::BadUpload(e.to_string()) }

fn report_body(report: &IngestionReport) -> serde_json::Value {
    let inserted: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match o {
            RowOutcome::Inserted(member) => Some(member),
            RowOutcome::Skipped { .. } => None,
        })
        .collect();
    let skipped: Vec<_> = report
        .skipped()
        .map(|(row, draft, reason)| SkippedRow {
            row,
            name: &draft.name,
            email: draft.email.as_deref(),
            reason: reason.to_string(),
        })
        .collect();
    json!({
        "success": true,
        "message": report.summary(),
        "count": report.total_count(),
        "inserted": inserted,
        "skipped": skipped,
    })
}
