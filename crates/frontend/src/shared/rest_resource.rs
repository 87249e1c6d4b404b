//! REST collaborator of one resource.
//!
//! Knows paths and envelopes through the resource descriptor and hands the
//! stores canonical values only: `ListPage`, `Record`, `Option<Record>`.

use super::http::{self, Body, Method};
use contracts::domain::common::{
    display_value, normalize_item, normalize_list, normalize_singleton, ApiError,
    BulkImportSummary, ListPage, ListQuery, Record, ResourceDescriptor, StatusValue,
};
use serde_json::Value;
use web_sys::{File, FormData};

/// Multipart field of spreadsheet imports.
const BULK_FILE_FIELD: &str = "file";

/// Create/update payload. With a file the request goes out as multipart.
#[derive(Debug, Clone, Default)]
pub struct RecordPayload {
    pub fields: Record,
    pub file: Option<File>,
}

impl RecordPayload {
    pub fn json(fields: Record) -> Self {
        Self { fields, file: None }
    }

    pub fn with_file(fields: Record, file: Option<File>) -> Self {
        Self { fields, file }
    }

    fn into_body(self, file_field: &str) -> Result<Body, ApiError> {
        let Some(file) = self.file else {
            return Ok(Body::Json(self.fields.into_value()));
        };
        let form = FormData::new()
            .map_err(|e| ApiError::encode(format!("Failed to create form data: {:?}", e)))?;
        form.append_with_blob(file_field, &file)
            .map_err(|e| ApiError::encode(format!("Failed to attach {}: {:?}", file.name(), e)))?;
        for (key, value) in self.fields.0.iter() {
            if value.is_null() || key == file_field {
                continue;
            }
            let text = display_value(value);
            form.append_with_str(key, &text)
                .map_err(|e| ApiError::encode(format!("Failed to append {}: {:?}", key, e)))?;
        }
        Ok(Body::Multipart(form))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestResource {
    pub descriptor: ResourceDescriptor,
}

impl RestResource {
    pub const fn new(descriptor: ResourceDescriptor) -> Self {
        Self { descriptor }
    }

    fn name(&self) -> &'static str {
        self.descriptor.name
    }

    fn writable(&self, operation: &str) -> Result<(), ApiError> {
        if self.descriptor.read_only {
            Err(ApiError::unsupported(self.name(), operation))
        } else {
            Ok(())
        }
    }

    /// `GET {base}` with the query as parameters. A scoped list without a
    /// scope is empty and sends nothing.
    pub async fn list(&self, query: &ListQuery) -> Result<ListPage, ApiError> {
        let Some(path) = self.descriptor.list_path(query) else {
            return Ok(ListPage::default());
        };
        let params = query.params();
        let body = http::get(&path, Some(&params)).await?;
        normalize_list(body, self.descriptor.list_key, query)
    }

    pub async fn get(&self, id: &str) -> Result<Record, ApiError> {
        let body = http::get(&self.descriptor.item_path(id), None).await?;
        normalize_item(body, self.descriptor.item_key)
    }

    pub async fn create(&self, payload: RecordPayload) -> Result<Record, ApiError> {
        self.writable("create")?;
        let body = payload.into_body(self.descriptor.file_field)?;
        let response = http::send(Method::Post, self.descriptor.base_path, None, body).await?;
        normalize_item(response, self.descriptor.item_key)
    }

    pub async fn update(&self, id: &str, payload: RecordPayload) -> Result<Record, ApiError> {
        self.writable("update")?;
        let body = payload.into_body(self.descriptor.file_field)?;
        let response =
            http::send(Method::Put, &self.descriptor.item_path(id), None, body).await?;
        normalize_item(response, self.descriptor.item_key)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.writable("delete")?;
        http::send(Method::Delete, &self.descriptor.item_path(id), None, Body::Empty).await?;
        Ok(())
    }

    /// Sends the status change and returns the patch to merge into the held
    /// record: the status field only.
    pub async fn set_status(&self, id: &str, target: &StatusValue) -> Result<Record, ApiError> {
        let (Some(toggle), Some(path)) = (
            self.descriptor.status,
            self.descriptor.status_path(id, target),
        ) else {
            return Err(ApiError::unsupported(self.name(), "status changes"));
        };
        let body = toggle
            .request_body(target)
            .map_or(Body::Empty, Body::Json);
        let response = http::send(Method::Patch, &path, None, body).await?;
        Ok(toggle.patch_from_response(&response, target))
    }

    pub async fn bulk_import(&self, file: &File) -> Result<BulkImportSummary, ApiError> {
        let Some(path) = self.descriptor.bulk_import_path() else {
            return Err(ApiError::unsupported(self.name(), "bulk import"));
        };
        let form = FormData::new()
            .map_err(|e| ApiError::encode(format!("Failed to create form data: {:?}", e)))?;
        form.append_with_blob(BULK_FILE_FIELD, file)
            .map_err(|e| ApiError::encode(format!("Failed to attach {}: {:?}", file.name(), e)))?;
        let response = http::send(Method::Post, &path, None, Body::Multipart(form)).await?;
        match response {
            Value::Null => Ok(BulkImportSummary::default()),
            body => serde_json::from_value(body)
                .map_err(|e| ApiError::decode(format!("Failed to parse import summary: {}", e))),
        }
    }

    // ------------------------------------------------------------------
    // Singleton resources: one record at the base path, no id.
    // ------------------------------------------------------------------

    pub async fn fetch_singleton(&self) -> Result<Option<Record>, ApiError> {
        let body = http::get(self.descriptor.base_path, None).await?;
        normalize_singleton(body, self.descriptor.list_key)
    }

    /// Upsert: `POST` while nothing exists yet, `PUT` afterwards.
    pub async fn save_singleton(
        &self,
        payload: RecordPayload,
        exists: bool,
    ) -> Result<Record, ApiError> {
        let method = if exists { Method::Put } else { Method::Post };
        let body = payload.into_body(self.descriptor.file_field)?;
        let response = http::send(method, self.descriptor.base_path, None, body).await?;
        normalize_item(response, self.descriptor.item_key)
    }

    pub async fn delete_singleton(&self) -> Result<(), ApiError> {
        http::send(Method::Delete, self.descriptor.base_path, None, Body::Empty).await?;
        Ok(())
    }
}
