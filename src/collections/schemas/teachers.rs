use crate::collections::{CollectionSchema, FormMode, SchemaMessages, require};
use crate::models::teachers::entities::Teacher;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Enseignant non trouvé",
    list_failed: "Impossible de charger la liste des enseignants",
    load_failed: "Impossible de charger les détails de l'enseignant",
    save_failed: "Impossible d'enregistrer l'enseignant",
    created: "Enseignant créé avec succès",
    updated: "Enseignant mis à jour avec succès",
    deleted: "Enseignant supprimé avec succès",
    delete_failed: "Impossible de supprimer l'enseignant",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer cet enseignant ?",
};

impl CollectionSchema for Teacher {
    const COLLECTION: &'static str = "teachers";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.department.as_str(),
            self.specialization.as_str(),
        ]
    }

    fn display_title(&self) -> String {
        format!("{} {} {}", self.title, self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    fn validate(&self, _mode: &FormMode) -> Result<(), &'static str> {
        require(&self.first_name, "Le prénom est requis")?;
        require(&self.last_name, "Le nom est requis")?;
        require(&self.email, "L'email est requis")?;
        require(&self.department, "Le département est requis")?;
        require(&self.title, "Le titre est requis")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::matches_query;

    fn teacher() -> Teacher {
        Teacher {
            first_name: "Moussa".into(),
            last_name: "Ndiaye".into(),
            email: "m.ndiaye@univ.fr".into(),
            department: "Mathématiques".into(),
            title: "Professeur".into(),
            specialization: "Algèbre".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(teacher().validate(&FormMode::Create), Ok(()));
        let missing_title = Teacher {
            title: String::new(),
            ..teacher()
        };
        assert_eq!(
            missing_title.validate(&FormMode::Create),
            Err("Le titre est requis")
        );
    }

    #[test]
    fn test_search_fields() {
        let teacher = teacher();
        assert!(matches_query(&teacher, "ndiaye"));
        assert!(matches_query(&teacher, "@univ.fr"));
        assert!(matches_query(&teacher, "mathém"));
        assert!(matches_query(&teacher, "ALGÈBRE"));
        assert!(!matches_query(&teacher, "professeur"));
    }
}
