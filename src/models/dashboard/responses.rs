use serde::Serialize;
use ts_rs::TS;

/// 首页统计，各集合的文档数量
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/dashboard.ts")]
pub struct DashboardStats {
    pub students: u64,
    pub teachers: u64,
    pub courses: u64,
    pub resources: u64,
    pub events: u64,
    pub projects: u64,
}
