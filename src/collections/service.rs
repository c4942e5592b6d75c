use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{CollectionSchema, FormMode, PendingDelete, WriteContext, filter_documents};
use crate::errors::{CampusError, Result};
use crate::models::documents::entities::Document;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 单个集合的列表、详情、表单提交与删除
pub struct CollectionService<S: CollectionSchema> {
    storage: Arc<dyn Storage>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: CollectionSchema> Clone for CollectionService<S> {
    fn clone(&self) -> Self {
        Self::new(self.storage.clone())
    }
}

impl<S: CollectionSchema> CollectionService<S> {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            _schema: PhantomData,
        }
    }

    /// 取出整个集合后在内存中过滤
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Document<S>>> {
        let stored = self.storage.list_documents(S::COLLECTION).await?;
        let documents = stored
            .into_iter()
            .filter_map(|stored| match Document::<S>::from_stored(stored) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!("Skipping malformed document: {}", e);
                    None
                }
            })
            .collect();
        Ok(filter_documents(documents, query))
    }

    pub async fn get(&self, id: &str) -> Result<Document<S>> {
        let stored = self
            .storage
            .get_document(S::COLLECTION, id)
            .await?
            .ok_or_else(|| CampusError::not_found(S::messages().not_found))?;
        Document::from_stored(stored)
    }

    /// 表单提交：校验失败时不会访问存储
    pub async fn submit(
        &self,
        mode: FormMode,
        mut fields: S,
        actor: Option<&User>,
    ) -> Result<Document<S>> {
        fields.validate(&mode).map_err(CampusError::validation)?;

        let ctx = WriteContext {
            storage: self.storage.as_ref(),
            actor,
            mode: &mode,
        };
        fields.before_write(&ctx).await?;
        let data = serde_json::to_value(&fields)?;

        let stored = match &mode {
            FormMode::Create => self.storage.insert_document(S::COLLECTION, data).await?,
            FormMode::Edit(id) => self
                .storage
                .replace_document(S::COLLECTION, id, data)
                .await?
                .ok_or_else(|| CampusError::not_found(S::messages().not_found))?,
        };
        debug!("Saved {}/{} ({:?})", S::COLLECTION, stored.id, mode);
        Document::from_stored(stored)
    }

    /// 加载记录并返回待确认的删除
    pub async fn request_delete(&self, id: &str) -> Result<PendingDelete<S>> {
        let document = self.get(id).await?;
        Ok(PendingDelete::new(
            self.storage.clone(),
            document.id,
            document.fields.display_title(),
        ))
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_documents(S::COLLECTION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::schemas::UNKNOWN_UPLOADER;
    use crate::models::courses::entities::Course;
    use crate::models::projects::entities::Project;
    use crate::models::resources::entities::Resource;
    use crate::models::students::entities::Student;
    use crate::models::users::entities::{SignInProvider, UserRole};
    use crate::storage::memory::MemoryStorage;

    fn student(first: &str, last: &str, matricule: &str) -> Student {
        Student {
            user_id: format!("u-{matricule}"),
            matricule: matricule.into(),
            first_name: first.into(),
            last_name: last.into(),
            promotion: "L2".into(),
            department: "Informatique".into(),
            ..Default::default()
        }
    }

    fn setup() -> (Arc<MemoryStorage>, CollectionService<Student>) {
        let storage = Arc::new(MemoryStorage::new());
        let service = CollectionService::<Student>::new(storage.clone());
        (storage, service)
    }

    #[tokio::test]
    async fn test_create_then_edit_by_id() {
        let (storage, service) = setup();
        let created = service
            .submit(FormMode::from_id(None), student("Awa", "Diop", "E1"), None)
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let edited = service
            .submit(
                FormMode::from_id(Some(&created.id)),
                student("Awa", "Diop-Sarr", "E1"),
                None,
            )
            .await
            .unwrap();
        assert_eq!(edited.id, created.id);
        assert_eq!(edited.fields.last_name, "Diop-Sarr");

        assert_eq!(service.list(None).await.unwrap().len(), 1);
        assert_eq!(storage.document_writes(), 2);
    }

    #[tokio::test]
    async fn test_edit_of_missing_document_is_not_found() {
        let (_, service) = setup();
        let err = service
            .submit(FormMode::Edit("nope".into()), student("A", "B", "E1"), None)
            .await
            .unwrap_err();
        assert_eq!(err, CampusError::not_found("Étudiant non trouvé"));
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_store() {
        let (storage, service) = setup();
        let err = service
            .submit(FormMode::Create, student("Awa", "Diop", ""), None)
            .await
            .unwrap_err();
        assert_eq!(err, CampusError::validation("Le matricule est requis"));
        assert_eq!(storage.document_writes(), 0);
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively() {
        let (_, service) = setup();
        for (first, last, matricule) in [
            ("Awa", "Diop", "E1"),
            ("Moussa", "Ndiaye", "E2"),
            ("Fatou", "Diallo", "E3"),
        ] {
            service
                .submit(FormMode::Create, student(first, last, matricule), None)
                .await
                .unwrap();
        }

        let mut names: Vec<String> = service
            .list(Some("DI"))
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.fields.last_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Diallo", "Diop", "Ndiaye"]);

        let found = service.list(Some("moussa")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fields.matricule, "E2");

        // 查询串不做裁剪
        assert!(service.list(Some("  moussa ")).await.unwrap().is_empty());
        assert!(service.list(Some("zzz")).await.unwrap().is_empty());
        assert_eq!(service.list(Some("")).await.unwrap().len(), 3);
        assert_eq!(service.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (storage, service) = setup();
        let doc = service
            .submit(FormMode::Create, student("Awa", "Diop", "E1"), None)
            .await
            .unwrap();

        let pending = service.request_delete(&doc.id).await.unwrap();
        assert_eq!(pending.title(), "Awa Diop");
        assert_eq!(
            pending.prompt(),
            "Êtes-vous sûr de vouloir supprimer cet étudiant ?"
        );
        pending.cancel();

        drop(service.request_delete(&doc.id).await.unwrap());
        assert_eq!(storage.document_deletes(), 0);
        assert!(service.get(&doc.id).await.is_ok());

        service
            .request_delete(&doc.id)
            .await
            .unwrap()
            .confirm()
            .await
            .unwrap();
        assert_eq!(storage.document_deletes(), 1);
        assert!(service.get(&doc.id).await.is_err());
    }

    #[tokio::test]
    async fn test_request_delete_of_missing_document() {
        let (storage, service) = setup();
        let err = service.request_delete("ghost").await.err().unwrap();
        assert_eq!(err, CampusError::not_found("Étudiant non trouvé"));
        assert_eq!(storage.document_deletes(), 0);
    }

    #[tokio::test]
    async fn test_resource_copies_course_title_and_uploader() {
        let storage = Arc::new(MemoryStorage::new());
        let courses = CollectionService::<Course>::new(storage.clone());
        let resources = CollectionService::<Resource>::new(storage.clone());

        let course = courses
            .submit(
                FormMode::Create,
                Course {
                    title: "Algèbre linéaire".into(),
                    code: "MATH201".into(),
                    credits: 6,
                    instructor: "Moussa Ndiaye".into(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let now = chrono::Utc::now();
        let actor = User {
            id: "u-1".into(),
            email: "awa@univ.fr".into(),
            password_hash: String::new(),
            display_name: Some("Awa Diop".into()),
            photo_url: None,
            role: UserRole::Professor,
            provider: SignInProvider::Password,
            created_at: now,
            updated_at: now,
        };

        let resource = Resource {
            title: "Cours 1".into(),
            resource_type: "PDF".into(),
            course_id: course.id.clone(),
            course_name: "stale".into(),
            file_url: "/api/v1/files/download/t1".into(),
            ..Default::default()
        };
        let saved = resources
            .submit(FormMode::Create, resource.clone(), Some(&actor))
            .await
            .unwrap();
        assert_eq!(saved.fields.course_name, "Algèbre linéaire");
        assert_eq!(saved.fields.uploaded_by, "Awa Diop");

        let anonymous = resources
            .submit(FormMode::Create, resource, None)
            .await
            .unwrap();
        assert_eq!(anonymous.fields.uploaded_by, UNKNOWN_UPLOADER);
    }

    #[tokio::test]
    async fn test_project_participants_are_normalized() {
        let storage = Arc::new(MemoryStorage::new());
        let projects = CollectionService::<Project>::new(storage);
        let saved = projects
            .submit(
                FormMode::Create,
                Project {
                    title: "Détection de fraude".into(),
                    supervisor: "Moussa Ndiaye".into(),
                    participants: vec![" Awa ".into(), "".into(), "Fatou".into(), "  ".into()],
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(saved.fields.participants, vec!["Awa", "Fatou"]);
    }

    #[tokio::test]
    async fn test_resource_edit_without_file_keeps_stored_file() {
        let storage = Arc::new(MemoryStorage::new());
        let resources = CollectionService::<Resource>::new(storage);
        let created = resources
            .submit(
                FormMode::Create,
                Resource {
                    title: "Cours 1".into(),
                    resource_type: "PDF".into(),
                    file_url: "/api/v1/files/download/t1".into(),
                    file_type: "pdf".into(),
                    size: 1234,
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let edited = resources
            .submit(
                FormMode::Edit(created.id.clone()),
                Resource {
                    title: "Cours 1 (corrigé)".into(),
                    resource_type: "PDF".into(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(edited.fields.title, "Cours 1 (corrigé)");
        assert_eq!(edited.fields.file_url, "/api/v1/files/download/t1");
        assert_eq!(edited.fields.file_type, "pdf");
        assert_eq!(edited.fields.size, 1234);

        let replaced = resources
            .submit(
                FormMode::Edit(created.id.clone()),
                Resource {
                    title: "Cours 1".into(),
                    resource_type: "PDF".into(),
                    file_url: "/api/v1/files/download/t2".into(),
                    file_type: "docx".into(),
                    size: 10,
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(replaced.fields.file_url, "/api/v1/files/download/t2");
        assert_eq!(resources.get(&created.id).await.unwrap().fields.size, 10);
    }
}
