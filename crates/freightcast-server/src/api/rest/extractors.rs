//! Custom extractors
//!
//! Provides request extractors with JSON error bodies.

use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Multipart, Request},
    http::{header, StatusCode},
    Json,
};
use freightcast_sdk::{Dataset, SdkError};
use serde_json::json;

/// Custom JSON extractor with better error messages
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("JSON syntax error: {}", err)
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection),
                };

                Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": error_message,
                        "status": 400,
                    })),
                ))
            }
        }
    }
}

/// Name of the multipart field carrying the CSV file
pub const UPLOAD_FIELD: &str = "file";

/// CSV training data, sent either as the `file` field of a multipart form
/// or as the raw request body.
pub struct CsvUpload(pub Dataset);

#[axum::async_trait]
impl<S> FromRequest<S> for CsvUpload
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        let bytes = if is_multipart {
            read_multipart_file(Multipart::from_request(req, state).await.map_err(|e| {
                ServerError::InvalidRequest(format!("Invalid multipart body: {}", e))
            })?)
            .await?
        } else {
            Bytes::from_request(req, state)
                .await
                .map_err(|e| ServerError::InvalidRequest(format!("Failed to read body: {}", e)))?
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ServerError::InvalidRequest("Uploaded CSV is empty".to_string()));
        }

        let dataset = Dataset::from_csv_reader(&bytes[..]).map_err(SdkError::Dataset)?;

        tracing::info!(
            rows = dataset.n_rows(),
            columns = dataset.n_columns(),
            "CSV upload parsed"
        );

        Ok(Self(dataset))
    }
}

async fn read_multipart_file(mut multipart: Multipart) -> Result<Bytes, ServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| ServerError::InvalidRequest(format!("Failed to read file: {}", e)));
        }
    }

    Err(ServerError::InvalidRequest(format!(
        "Multipart body has no '{}' field",
        UPLOAD_FIELD
    )))
}
