use crate::collections::{CollectionSchema, FormMode, SchemaMessages, require};
use crate::models::events::entities::Event;

static MESSAGES: SchemaMessages = SchemaMessages {
    not_found: "Événement non trouvé",
    list_failed: "Impossible de charger la liste des événements",
    load_failed: "Impossible de charger les détails de l'événement",
    save_failed: "Impossible d'enregistrer l'événement",
    created: "Événement créé avec succès",
    updated: "Événement mis à jour avec succès",
    deleted: "Événement supprimé avec succès",
    delete_failed: "Impossible de supprimer l'événement",
    delete_prompt: "Êtes-vous sûr de vouloir supprimer cet événement ?",
};

impl CollectionSchema for Event {
    const COLLECTION: &'static str = "events";

    fn messages() -> &'static SchemaMessages {
        &MESSAGES
    }

    fn search_values(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.event_type.as_str(),
            self.location.as_str(),
            self.description.as_str(),
        ]
    }

    fn display_title(&self) -> String {
        self.title.clone()
    }

    fn validate(&self, _mode: &FormMode) -> Result<(), &'static str> {
        require(&self.title, "Le titre est requis")?;
        require(&self.event_type, "Le type d'événement est requis")?;
        require(&self.location, "Le lieu est requis")?;
        if self.end_date < self.start_date {
            return Err("La date de fin doit être postérieure à la date de début");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::collections::matches_query;

    fn conference() -> Event {
        Event {
            title: "Conférence IA".into(),
            event_type: "Conférence".into(),
            location: "Amphi A".into(),
            description: "Apprentissage automatique".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_status_and_duration() {
        let event = Event::default();
        assert_eq!(event.status, "À venir");
        assert_eq!(event.end_date - event.start_date, Duration::hours(2));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let event = conference();
        assert_eq!(event.validate(&FormMode::Create), Ok(()));

        let same_instant = Event {
            start_date: event.start_date,
            end_date: event.start_date,
            ..conference()
        };
        assert_eq!(same_instant.validate(&FormMode::Create), Ok(()));

        let reversed = Event {
            end_date: event.start_date - Duration::minutes(1),
            start_date: event.start_date,
            ..conference()
        };
        assert_eq!(
            reversed.validate(&FormMode::Create),
            Err("La date de fin doit être postérieure à la date de début")
        );
    }

    #[test]
    fn test_search_fields() {
        let event = conference();
        assert!(matches_query(&event, "amphi"));
        assert!(matches_query(&event, "automatique"));
        assert!(matches_query(&event, "conférence"));
        assert!(!matches_query(&event, "à venir"));
    }
}
