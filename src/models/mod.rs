//! 数据模型
//!
//! 业务实体、请求与响应结构。带 `#[ts(export)]` 的类型会导出给移动端 TypeScript 客户端。

pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod documents;
pub mod events;
pub mod files;
pub mod projects;
pub mod resources;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 响应体中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与会话
    AuthFailed = 2000,
    RegisterFailed = 2001,
    EmailAlreadyExists = 2002,
    PasswordInvalid = 2003,
    EmailInvalid = 2004,
    AccountNotFound = 2005,
    ProviderTokenInvalid = 2006,
    PasswordResetFailed = 2007,
    ProfileUpdateFailed = 2010,
    LogoutFailed = 2011,

    // 实体集合
    DocumentNotFound = 3000,
    DocumentValidationFailed = 3001,
    DocumentSaveFailed = 3002,
    DocumentDeleteFailed = 3003,
    DeleteConfirmationRequired = 3004,
    DocumentLoadFailed = 3005,

    // 文件
    FileNotFound = 4000,
    FileUploadFailed = 4001,
    FileTypeNotAllowed = 4002,
    FileSizeExceeded = 4003,
    MultifileUploadNotAllowed = 4004,
}
