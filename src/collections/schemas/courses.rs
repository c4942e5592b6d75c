use crate::collections::{CollectionSchema, FormMode, SchemaMessages, require};
use crate::models::courses::entities::Course;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Cours non trouvé",
    list_failed: "Impossible de charger la liste des cours",
    load_failed: "Impossible de charger les détails du cours",
    save_failed: "Impossible d'enregistrer le cours",
    created: "Cours créé avec succès",
    updated: "Cours mis à jour avec succès",
    deleted: "Cours supprimé avec succès",
    delete_failed: "Impossible de supprimer le cours. Veuillez réessayer.",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer ce cours ?",
};

impl CollectionSchema for Course {
    const COLLECTION: &'static str = "courses";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.code.as_str()]
    }

    fn display_title(&self) -> String {
        self.title.clone()
    }

    fn validate(&self, _mode: &FormMode) -> Result<(), &'static str> {
        require(&self.title, "Le titre du cours est requis")?;
        require(&self.code, "Le code du cours est requis")?;
        if self.credits <= 0 {
            return Err("Le nombre de crédits doit être supérieur à 0");
        }
        require(&self.instructor, "Le nom de l'enseignant est requis")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::matches_query;

    fn algebra() -> Course {
        Course {
            title: "Algèbre linéaire".into(),
            code: "MATH201".into(),
            credits: 6,
            instructor: "Moussa Ndiaye".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_credits_must_be_positive() {
        assert_eq!(algebra().validate(&FormMode::Create), Ok(()));
        let course = Course {
            credits: 0,
            ..algebra()
        };
        assert_eq!(
            course.validate(&FormMode::Create),
            Err("Le nombre de crédits doit être supérieur à 0")
        );
    }

    #[test]
    fn test_search_fields() {
        let course = algebra();
        assert!(matches_query(&course, "math2"));
        assert!(matches_query(&course, "LINÉAIRE"));
        assert!(!matches_query(&course, "ndiaye"));
    }
}
