use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/file.ts")]
pub struct File {
    // 下载令牌，同时作为主键
    pub token: String,
    // 上传时的原始文件名
    pub original_name: String,
    // 磁盘上的文件名
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    // 文件大小（字节）
    pub file_size: i64,
    // 扩展名，不含点
    pub file_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub user_id: String,
}

impl File {
    pub fn download_url(&self) -> String {
        format!("/api/v1/files/download/{}", self.token)
    }
}

// 文件创建参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateFileRequest {
    pub token: String,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: String,
}
