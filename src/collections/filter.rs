use super::CollectionSchema;
use crate::models::documents::entities::Document;

/// 任一检索字段包含查询串（不区分大小写）即匹配，查询串原样参与匹配
pub fn matches_query<S: CollectionSchema>(record: &S, query: &str) -> bool {
    let query = query.to_lowercase();
    record
        .search_values()
        .iter()
        .any(|value| value.to_lowercase().contains(&query))
}

pub fn filter_documents<S: CollectionSchema>(
    documents: Vec<Document<S>>,
    query: Option<&str>,
) -> Vec<Document<S>> {
    match query {
        Some(query) if !query.is_empty() => documents
            .into_iter()
            .filter(|document| matches_query(&document.fields, query))
            .collect(),
        _ => documents,
    }
}
