//! Heritage records: detail, creation, update and moderation.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use sji_core::models::{RecordCategory, RecordDetail, ValidationAction};

use crate::client::SjiClient;
use crate::error::{ApiError, ApiResult};
use crate::gateway::{RequestOptions, decode_required, segment};

fn record_path(category: RecordCategory, id: &str) -> String {
    format!("/api/v1/{}/{}", category.as_str(), segment(id))
}

impl SjiClient {
    /// Fetch one record, decoded as the shape of its category.
    ///
    /// A 404 is reported with the message `Fiche non trouvée pour l'ID: <id>`.
    pub async fn get_record_detail(
        &self,
        category: RecordCategory,
        id: &str,
    ) -> ApiResult<RecordDetail> {
        let path = record_path(category, id);
        let body = match self
            .gateway
            .request(Method::GET, &path, RequestOptions::new())
            .await
        {
            Err(ApiError::Http {
                status: 404,
                payload,
                ..
            }) => {
                return Err(ApiError::Http {
                    status: 404,
                    message: format!("Fiche non trouvée pour l'ID: {id}"),
                    payload,
                });
            }
            other => other?,
        };

        let value: Value = decode_required(&path, body)?;
        RecordDetail::from_value(category, value).map_err(|e| ApiError::Decode {
            message: format!("{path}: {e}"),
        })
    }

    /// Submit a new record. Returns the created record when the server sends one.
    pub async fn create_record<B: Serialize + ?Sized>(
        &self,
        category: RecordCategory,
        record: &B,
    ) -> ApiResult<Option<Value>> {
        self.gateway
            .send_json(
                Method::POST,
                &format!("/api/v1/{}", category.as_str()),
                record,
            )
            .await
    }

    /// Replace a record; a modification of a published record comes back
    /// as a new pending record carrying `parent_id`.
    pub async fn update_record<B: Serialize + ?Sized>(
        &self,
        category: RecordCategory,
        id: &str,
        record: &B,
    ) -> ApiResult<Option<Value>> {
        self.gateway
            .send_json(Method::PUT, &record_path(category, id), record)
            .await
    }

    /// Publish or reject a pending record.
    pub async fn validate_record(
        &self,
        category: RecordCategory,
        id: &str,
        action: ValidationAction,
    ) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::PATCH,
                &record_path(category, id),
                RequestOptions::json(&json!({ "action": action }))?,
            )
            .await
    }
}
