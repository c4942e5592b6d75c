use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use super::CollectionSchema;
use crate::errors::{CampusError, Result};
use crate::storage::Storage;

/// 待确认的删除
///
/// 只有 [`PendingDelete::confirm`] 会向存储发出删除；取消或直接丢弃不会产生任何写入。
#[must_use = "a pending delete does nothing until it is confirmed"]
pub struct PendingDelete<S: CollectionSchema> {
    storage: Arc<dyn Storage>,
    id: String,
    title: String,
    _schema: PhantomData<fn() -> S>,
}

impl<S: CollectionSchema> PendingDelete<S> {
    pub(crate) fn new(storage: Arc<dyn Storage>, id: String, title: String) -> Self {
        Self {
            storage,
            id,
            title,
            _schema: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prompt(&self) -> &'static str {
        S::messages().delete_prompt
    }

    pub async fn confirm(self) -> Result<()> {
        let deleted = self.storage.delete_document(S::COLLECTION, &self.id).await?;
        if !deleted {
            return Err(CampusError::not_found(S::messages().not_found));
        }
        info!("Deleted {}/{}", S::COLLECTION, self.id);
        Ok(())
    }

    pub fn cancel(self) {
        debug!("Delete of {}/{} cancelled", S::COLLECTION, self.id);
    }
}
