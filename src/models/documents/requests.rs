use serde::Deserialize;
use ts_rs::TS;

// 列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/document.ts")]
pub struct CollectionListQuery {
    /// 按集合的检索字段做不区分大小写的子串匹配
    pub search: Option<String>,
}

// 删除参数，confirm 为 true 才会真正删除
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/document.ts")]
pub struct DeleteDocumentQuery {
    #[serde(default)]
    pub confirm: bool,
}
