use serde::Serialize;
use ts_rs::TS;

use super::entities::Document;

#[derive(Debug, Serialize)]
pub struct DocumentListResponse<T> {
    pub items: Vec<Document<T>>,
    pub total: usize,
}

/// 未确认的删除请求返回的内容
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/document.ts")]
pub struct DeleteConfirmationResponse {
    pub id: String,
    pub title: String,
    pub prompt: String,
}
