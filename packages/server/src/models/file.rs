use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::customer_file;

/// A parsed multipart upload, handed to the repository as a whole.
pub struct UploadFileRequest {
    /// Raw user-supplied filename; sanitized before use.
    pub filename: String,
    pub content: Vec<u8>,
    pub description: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FileResponse {
    pub id: i32,
    pub customer_id: i32,
    /// Sanitized original filename, used as the download name.
    #[schema(example = "contract.pdf")]
    pub original_name: String,
    pub description: Option<String>,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<customer_file::Model> for FileResponse {
    fn from(m: customer_file::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            original_name: m.original_name,
            description: m.description,
            size_bytes: m.size_bytes,
            uploaded_at: m.uploaded_at,
        }
    }
}
