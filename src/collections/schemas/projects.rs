use async_trait::async_trait;

use crate::collections::{CollectionSchema, FormMode, SchemaMessages, WriteContext, require};
use crate::errors::Result;
use crate::models::projects::entities::Project;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Projet non trouvé",
    list_failed: "Impossible de charger la liste des projets",
    load_failed: "Impossible de charger les détails du projet",
    save_failed: "Impossible d'enregistrer le projet",
    created: "Projet créé avec succès",
    updated: "Projet mis à jour avec succès",
    deleted: "Projet supprimé avec succès",
    delete_failed: "Impossible de supprimer le projet",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer ce projet ?",
};

#[async_trait]
impl CollectionSchema for Project {
    const COLLECTION: &'static str = "projects";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.category.as_str()]
    }

    fn display_title(&self) -> String {
        self.title.clone()
    }

    fn validate(&self, _mode: &FormMode) -> std::result::Result<(), &'static str> {
        require(&self.title, "Le titre du projet est requis")?;
        require(&self.supervisor, "Le nom du superviseur est requis")?;
        require(&self.category, "La catégorie du projet est requise")
    }

    async fn before_write(&mut self, _ctx: &WriteContext<'_>) -> Result<()> {
        self.participants = self
            .participants
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::matches_query;

    fn thesis() -> Project {
        Project {
            title: "Détection de fraude".into(),
            supervisor: "Moussa Ndiaye".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_satisfy_category_rule() {
        let project = thesis();
        assert_eq!(project.status, "En attente");
        assert_eq!(project.category, "Recherche");
        assert_eq!(project.validate(&FormMode::Create), Ok(()));

        let project = Project {
            category: " ".into(),
            ..thesis()
        };
        assert_eq!(
            project.validate(&FormMode::Create),
            Err("La catégorie du projet est requise")
        );
    }

    #[test]
    fn test_search_fields() {
        let project = thesis();
        assert!(matches_query(&project, "FRAUDE"));
        assert!(matches_query(&project, "recherche"));
        assert!(!matches_query(&project, "ndiaye"));
    }
}
