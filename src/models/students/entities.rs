use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生档案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/student.ts")]
pub struct Student {
    /// 关联账户 ID
    pub user_id: String,
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub promotion: String,
    pub department: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
