use crate::collections::{CollectionSchema, FormMode, SchemaMessages, require};
use crate::identity::storage_provider::PROFILE_COLLECTION;
use crate::models::users::entities::UserProfileRecord;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Utilisateur non trouvé",
    list_failed: "Impossible de charger la liste des utilisateurs",
    load_failed: "Impossible de charger les détails de l'utilisateur",
    save_failed: "Impossible de créer l'utilisateur",
    created: "Utilisateur créé avec succès",
    updated: "Utilisateur mis à jour avec succès",
    deleted: "Utilisateur supprimé avec succès",
    delete_failed: "Impossible de supprimer l'utilisateur",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer cet utilisateur ?",
};

/// 没有姓名时列表中显示的名称
pub const FALLBACK_USER_NAME: &str = "Utilisateur";

// 资料记录只由身份服务写入，这里只用于列表、详情与删除
impl CollectionSchema for UserProfileRecord {
    const COLLECTION: &'static str = PROFILE_COLLECTION;

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.email.as_str()]
    }

    fn display_title(&self) -> String {
        let name = self.full_name.trim();
        if name.is_empty() {
            FALLBACK_USER_NAME.to_string()
        } else {
            name.to_string()
        }
    }

    fn validate(&self, _mode: &FormMode) -> Result<(), &'static str> {
        require(&self.full_name, "Veuillez remplir tous les champs")?;
        require(&self.email, "Veuillez remplir tous les champs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::matches_query;
    use crate::models::users::entities::UserRole;

    fn record(name: &str) -> UserProfileRecord {
        UserProfileRecord {
            full_name: name.into(),
            email: "awa.diop@univ.fr".into(),
            role: UserRole::Professor,
            created_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_search_by_name_or_email() {
        let awa = record("Awa Diop");
        assert!(matches_query(&awa, "AWA"));
        assert!(matches_query(&awa, "@univ"));
        assert!(!matches_query(&awa, "professeur"));
    }

    #[test]
    fn test_display_title_falls_back() {
        assert_eq!(record("Awa Diop").display_title(), "Awa Diop");
        assert_eq!(record("  ").display_title(), FALLBACK_USER_NAME);
    }
}
