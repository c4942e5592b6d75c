use crate::collections::{CollectionSchema, FormMode, SchemaMessages, require};
use crate::models::students::entities::Student;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Étudiant non trouvé",
    list_failed: "Impossible de charger la liste des étudiants",
    load_failed: "Impossible de charger les détails de l'étudiant",
    save_failed: "Impossible d'enregistrer l'étudiant",
    created: "Étudiant créé avec succès",
    updated: "Étudiant mis à jour avec succès",
    deleted: "Étudiant supprimé avec succès",
    delete_failed: "Impossible de supprimer l'étudiant",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer cet étudiant ?",
};

impl CollectionSchema for Student {
    const COLLECTION: &'static str = "students";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.matricule.as_str()]
    }

    fn display_title(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    fn validate(&self, _mode: &FormMode) -> Result<(), &'static str> {
        require(&self.first_name, "Le prénom est requis")?;
        require(&self.last_name, "Le nom est requis")?;
        require(&self.matricule, "Le matricule est requis")?;
        require(&self.user_id, "L'utilisateur associé est requis")?;
        require(&self.promotion, "La promotion est requise")?;
        require(&self.department, "Le département est requis")
    }
}
