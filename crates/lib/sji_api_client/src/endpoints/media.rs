//! Image uploads.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use sji_core::models::MediaUpload;

use crate::client::SjiClient;
use crate::error::{ApiError, ApiResult};
use crate::gateway::{RequestOptions, decode_required};

impl SjiClient {
    /// Upload an image as multipart field `file`; returns the new media id.
    pub async fn upload_media(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<MediaUpload> {
        let path = "/api/v1/medias";
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::Config(format!("invalid media type {mime}: {e}")))?;
        let form = Form::new().part("file", part);

        let body = self
            .gateway
            .request(Method::POST, path, RequestOptions::multipart(form))
            .await?;
        decode_required(path, body)
    }
}
