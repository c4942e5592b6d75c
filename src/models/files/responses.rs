use serde::Serialize;
use ts_rs::TS;

/// 上传结果，Resource 表单直接使用 url / file_type / size
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub token: String,
    pub url: String,
    pub file_name: String,
    pub file_type: String,
    pub size: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
