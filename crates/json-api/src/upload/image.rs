//! Upload Image Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use pr_maker_app::storage::StorageServiceError;

use crate::{extensions::*, state::State};

/// Content types accepted for banner images.
const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Upload size cap in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Image Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageUploadResponse {
    /// Public URL of the stored image
    pub url: String,
}

/// Upload Image Handler
///
/// Accepts a multipart `file` field and stores it in the image bucket.
#[endpoint(
    tags("upload"),
    summary = "Upload Banner Image",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ImageUploadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(file) = req.file("file").await else {
        return Err(StatusError::bad_request().brief("multipart field 'file' is required"));
    };

    let content_type = file
        .content_type()
        .map(|mime| mime.to_string())
        .unwrap_or_default();

    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(StatusError::bad_request()
            .brief("file must be a JPEG, PNG, GIF or WebP image"));
    }

    if file.size() as usize > MAX_UPLOAD_BYTES {
        return Err(StatusError::bad_request().brief("file exceeds the 10 MiB limit"));
    }

    let filename = file.name().unwrap_or("upload").to_string();

    let content = tokio::fs::read(file.path())
        .await
        .or_500("failed to read uploaded file")?;

    let url = state
        .storage
        .upload_image(content, &filename, &content_type)
        .await
        .map_err(|storage_error| match storage_error {
            StorageServiceError::NotConfigured => {
                error!("image upload rejected: storage not configured");

                StatusError::internal_server_error().brief("Image storage is not configured")
            }
            StorageServiceError::Http(source) => {
                error!("image upload failed: {source}");

                StatusError::internal_server_error()
            }
            StorageServiceError::UnexpectedResponse(detail) => {
                error!("image upload failed: {detail}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(ImageUploadResponse { url }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use pr_maker_app::storage::MockStorageService;

    use crate::test_helpers::storage_service;

    use super::*;

    const BOUNDARY: &str = "pr-maker-upload-test";

    fn make_service(storage: MockStorageService) -> Service {
        storage_service(storage, Router::with_path("upload/image").post(handler))
    }

    fn multipart_file(content_type: &str, payload: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"banner\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();

        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        body
    }

    #[tokio::test]
    async fn test_upload_without_file_field_returns_400() -> TestResult {
        let mut storage = MockStorageService::new();

        storage.expect_upload_image().never();

        let res = TestClient::post("http://example.com/upload/image")
            .send(&make_service(storage))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_upload_with_disallowed_content_type_returns_400() -> TestResult {
        let mut storage = MockStorageService::new();

        storage.expect_upload_image().never();

        let res = TestClient::post("http://example.com/upload/image")
            .add_header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
                true,
            )
            .bytes(multipart_file("text/plain", b"not an image"))
            .send(&make_service(storage))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_upload_exceeding_size_limit_returns_400() -> TestResult {
        let mut storage = MockStorageService::new();

        storage.expect_upload_image().never();

        let res = TestClient::post("http://example.com/upload/image")
            .add_header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
                true,
            )
            .bytes(multipart_file("image/png", &vec![0u8; MAX_UPLOAD_BYTES + 1]))
            .send(&make_service(storage))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
