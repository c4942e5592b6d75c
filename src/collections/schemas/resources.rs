use async_trait::async_trait;
use tracing::debug;

use crate::collections::{CollectionSchema, FormMode, SchemaMessages, WriteContext, require};
use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::documents::entities::Document;
use crate::models::resources::entities::Resource;

/// 无法确定上传者时写入的名称
pub const UNKNOWN_UPLOADER: &str = "Utilisateur inconnu";

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Ressource non trouvée",
    list_failed: "Impossible de charger la liste des ressources",
    load_failed: "Impossible de charger les détails de la ressource",
    save_failed: "Impossible d'enregistrer la ressource",
    created: "Ressource créée avec succès",
    updated: "Ressource mise à jour avec succès",
    deleted: "Ressource supprimée avec succès",
    delete_failed: "Impossible de supprimer la ressource",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer cette ressource ?",
};

#[async_trait]
impl CollectionSchema for Resource {
    const COLLECTION: &'static str = "resources";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.course_name.as_str(),
            self.resource_type.as_str(),
        ]
    }

    fn display_title(&self) -> String {
        self.title.clone()
    }

    fn validate(&self, mode: &FormMode) -> std::result::Result<(), &'static str> {
        require(&self.title, "Le titre de la ressource est requis")?;
        require(&self.resource_type, "Le type de ressource est requis")?;
        // 编辑时沿用已上传的文件
        if !mode.is_edit() {
            require(&self.file_url, "Veuillez sélectionner un fichier")?;
        }
        Ok(())
    }

    async fn before_write(&mut self, ctx: &WriteContext<'_>) -> Result<()> {
        if let FormMode::Edit(id) = ctx.mode
            && self.file_url.trim().is_empty()
            && let Some(stored) = ctx
                .storage
                .get_document(<Resource as CollectionSchema>::COLLECTION, id)
                .await?
        {
            let previous = Document::<Resource>::from_stored(stored)?;
            self.file_url = previous.fields.file_url;
            self.file_type = previous.fields.file_type;
            self.size = previous.fields.size;
        }

        let course_id = self.course_id.trim();
        if !course_id.is_empty()
            && let Some(stored) = ctx
                .storage
                .get_document(<Course as CollectionSchema>::COLLECTION, course_id)
                .await?
        {
            let course = Document::<Course>::from_stored(stored)?;
            debug!("Resource linked to course {}", course.id);
            self.course_name = course.fields.title;
        }

        self.upload_date = chrono::Utc::now();
        self.uploaded_by = ctx
            .actor
            .map(|user| user.label().to_string())
            .unwrap_or_else(|| UNKNOWN_UPLOADER.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::matches_query;

    fn slides() -> Resource {
        Resource {
            title: "Cours 3 - Matrices".into(),
            resource_type: "PDF".into(),
            course_name: "Algèbre linéaire".into(),
            file_url: "/api/v1/files/download/abc".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_required_only_on_create() {
        let without_file = Resource {
            file_url: String::new(),
            ..slides()
        };
        assert_eq!(
            without_file.validate(&FormMode::Create),
            Err("Veuillez sélectionner un fichier")
        );
        assert_eq!(
            without_file.validate(&FormMode::Edit("r-1".into())),
            Ok(())
        );
    }

    #[test]
    fn test_search_fields() {
        let resource = slides();
        assert!(matches_query(&resource, "matrices"));
        assert!(matches_query(&resource, "algèbre"));
        assert!(matches_query(&resource, "pdf"));
        assert!(!matches_query(&resource, "download"));
    }
}
