use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::collections::{CollectionSchema, CollectionService};
use crate::models::courses::entities::Course;
use crate::models::dashboard::responses::DashboardStats;
use crate::models::events::entities::Event;
use crate::models::projects::entities::Project;
use crate::models::resources::entities::Resource;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::models::ApiResponse;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::shared::<dyn Storage>(request, "Storage"),
        }
    }

    // 首页统计
    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let stats = collect_stats(&self.get_storage(request)?).await;
        Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "")))
    }
}

// 单个集合计数失败只影响该项
async fn count_or_zero<S: CollectionSchema>(storage: Arc<dyn Storage>) -> u64 {
    match CollectionService::<S>::new(storage).count().await {
        Ok(count) => count,
        Err(e) => {
            warn!("Failed to count {}: {}", S::COLLECTION, e);
            0
        }
    }
}

/// 六个集合并发计数
pub async fn collect_stats(storage: &Arc<dyn Storage>) -> DashboardStats {
    let (students, teachers, courses, resources, events, projects) = futures_util::join!(
        count_or_zero::<Student>(storage.clone()),
        count_or_zero::<Teacher>(storage.clone()),
        count_or_zero::<Course>(storage.clone()),
        count_or_zero::<Resource>(storage.clone()),
        count_or_zero::<Event>(storage.clone()),
        count_or_zero::<Project>(storage.clone()),
    );

    DashboardStats {
        students,
        teachers,
        courses,
        resources,
        events,
        projects,
    }
}
