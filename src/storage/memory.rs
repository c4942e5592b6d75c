//! 测试用内存存储

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Storage, merge_json};
use crate::errors::{CampusError, Result};
use crate::models::{
    documents::entities::StoredDocument,
    files::entities::{CreateFileRequest, File},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

#[derive(Default)]
pub struct MemoryStorage {
    users: Mutex<HashMap<String, User>>,
    documents: Mutex<Vec<StoredDocument>>,
    files: Mutex<HashMap<String, File>>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文档写入次数（插入、替换、合并）
    pub fn document_writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn document_deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == req.email) {
            return Err(CampusError::database_operation("UNIQUE constraint failed: users.email"));
        }
        let now = Self::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: req.email,
            password_hash: req.password_hash,
            display_name: req.display_name,
            photo_url: req.photo_url,
            role: req.role,
            provider: req.provider,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(&self, id: &str, update: UpdateUserRequest) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(display_name) = update.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(photo_url) = update.photo_url {
            user.photo_url = Some(photo_url);
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        user.updated_at = Self::now();
        Ok(Some(user.clone()))
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.collection == collection)
            .cloned()
            .collect())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.collection == collection && d.id == id)
            .cloned())
    }

    async fn insert_document(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<StoredDocument> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let now = Self::now();
        let document = StoredDocument {
            id: uuid::Uuid::new_v4().to_string(),
            collection: collection.to_string(),
            data,
            created_at: now,
            updated_at: now,
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Option<StoredDocument>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut documents = self.documents.lock().unwrap();
        let Some(document) = documents
            .iter_mut()
            .find(|d| d.collection == collection && d.id == id)
        else {
            return Ok(None);
        };
        document.data = data;
        document.updated_at = Self::now();
        Ok(Some(document.clone()))
    }

    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<StoredDocument> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut documents = self.documents.lock().unwrap();
        if let Some(document) = documents
            .iter_mut()
            .find(|d| d.collection == collection && d.id == id)
        {
            merge_json(&mut document.data, patch);
            document.updated_at = Self::now();
            return Ok(document.clone());
        }
        let now = Self::now();
        let document = StoredDocument {
            id: id.to_string(),
            collection: collection.to_string(),
            data: patch,
            created_at: now,
            updated_at: now,
        };
        documents.push(document.clone());
        Ok(document)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| !(d.collection == collection && d.id == id));
        Ok(documents.len() < before)
    }

    async fn count_documents(&self, collection: &str) -> Result<u64> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.collection == collection)
            .count() as u64)
    }

    async fn create_file(&self, req: CreateFileRequest) -> Result<File> {
        let file = File {
            token: req.token,
            original_name: req.original_name,
            stored_name: req.stored_name,
            file_size: req.file_size,
            file_type: req.file_type,
            uploaded_at: Self::now(),
            user_id: req.user_id,
        };
        self.files
            .lock()
            .unwrap()
            .insert(file.token.clone(), file.clone());
        Ok(file)
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        Ok(self.files.lock().unwrap().get(token).cloned())
    }
}
