//! Document handlers
//!
//! Uploaded files are kept inline as `data:` URLs.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::{ApiResponse, AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::{OwnEmployee, Principal, ResourceType, visibility_filter};
use crate::db;
use crate::db::documents::{Document, DocumentEntry, DocumentFilter, NewDocument};
use crate::error::{ApiResult, ServiceError};
use crate::state::AppState;

/// Largest accepted file
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_CATEGORY: &str = "Other";
const DEFAULT_MIME: &str = "application/octet-stream";

struct UploadedFile {
    name: String,
    mime: Option<String>,
    data: Vec<u8>,
}

fn data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// POST /api/documents/upload
pub async fn upload(
    State(state): State<AppState>,
    OwnEmployee(employee_id): OwnEmployee,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Document>), ServiceError> {
    let mut file: Option<UploadedFile> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Invalid multipart request: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let mime = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::new(ErrorCode::FileTooLarge))?
                    .to_vec();
                file = Some(UploadedFile { name, mime, data });
            }
            Some("category") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Invalid category: {e}")))?;
                category = Some(text).filter(|c| !c.trim().is_empty());
            }
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.data.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if file.data.len() > MAX_FILE_BYTES {
        return Err(AppError::new(ErrorCode::FileTooLarge).into());
    }

    let mime = file.mime.as_deref().unwrap_or(DEFAULT_MIME);
    let url = data_url(mime, &file.data);
    let document = db::documents::create(
        &state.pool,
        employee_id,
        &NewDocument {
            file_url: &url,
            file_name: &file.name,
            file_type: Some(mime),
            category: category.as_deref().unwrap_or(DEFAULT_CATEGORY),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/documents
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<DocumentFilter>,
) -> ApiResult<Vec<DocumentEntry>> {
    let scope = visibility_filter(&principal, ResourceType::Document).narrow(filter.employee_id);
    let rows = db::documents::list(&state.pool, scope, &filter).await?;
    Ok(Json(rows))
}

/// DELETE /api/documents/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<ApiResponse> {
    if !db::documents::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::DocumentNotFound).into());
    }
    Ok(Json(ApiResponse::message("Document deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("text/plain", b"hi"), "data:text/plain;base64,aGk=");
    }
}
