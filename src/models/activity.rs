use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    // Unique emails; kept in signup order so the catalog renders stably.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

/// Ordered name -> activity mapping.
///
/// Serializes as a JSON object (the `GET /activities` body and the seed file
/// format) while keeping entries in the order they were seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityCatalog {
    entries: IndexMap<String, Activity>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `name`, keeping its original position on replace.
    pub fn push(&mut self, name: impl Into<String>, activity: Activity) {
        self.entries.insert(name.into(), activity);
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ActivityCatalog {
    type Item = (String, Activity);
    type IntoIter = indexmap::map::IntoIter<String, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(participants: &[&str]) -> Activity {
        Activity {
            description: "Board games".to_string(),
            schedule: "Fridays".to_string(),
            max_participants: 10,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn catalog_serializes_as_object_in_insertion_order() {
        let mut catalog = ActivityCatalog::new();
        catalog.push("Zither Ensemble", club(&[]));
        catalog.push("Art Club", club(&["a@mergington.edu"]));

        let json = serde_json::to_string(&catalog).unwrap();
        let zither = json.find("Zither Ensemble").unwrap();
        let art = json.find("Art Club").unwrap();
        assert!(zither < art, "got: {json}");
        assert!(json.contains(r#""participants":["a@mergington.edu"]"#));
    }

    #[test]
    fn catalog_deserialize_keeps_document_order() {
        let json = r#"{
            "Zither Ensemble": {"description": "d", "schedule": "s", "max_participants": 2},
            "Archery": {"description": "d", "schedule": "s", "max_participants": 3}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["Zither Ensemble", "Archery"]
        );
    }

    #[test]
    fn repeated_name_keeps_last_value_in_first_position() {
        let json = r#"{
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 2},
            "Art Club": {"description": "d", "schedule": "s", "max_participants": 5},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 3}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().next(), Some("Chess Club"));
        assert_eq!(catalog.get("Chess Club").unwrap().max_participants, 3);
    }

    #[test]
    fn missing_participants_defaults_to_empty() {
        let json = r#"{"Chess Club": {"description": "d", "schedule": "s", "max_participants": 2}}"#;
        let catalog: ActivityCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.get("Chess Club").unwrap().participant_count(), 0);
    }
}
