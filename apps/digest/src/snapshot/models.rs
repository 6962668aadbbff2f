use serde::{Deserialize, Deserializer};

/// The only checklist item state treated as done. Anything else is incomplete.
pub const COMPLETE_STATE: &str = "complete";

// ────────────────────────────────────────────────────────────────────────────
// Decoded snapshot (board export shape)
// ────────────────────────────────────────────────────────────────────────────

/// A decoded board export. Read-only for the rest of the run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklists: Vec<Checklist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<LabelRef>,
    #[serde(rename = "idMembers", default, deserialize_with = "null_as_default")]
    pub id_members: Vec<String>,
    #[serde(rename = "idChecklists", default, deserialize_with = "null_as_default")]
    pub id_checklists: Vec<String>,
}

impl Card {
    pub fn is_assigned_to(&self, member_id: &str) -> bool {
        self.id_members.iter().any(|id| id == member_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Checklist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "checkItems", default, deserialize_with = "null_as_default")]
    pub check_items: Vec<CheckItem>,
}

/// Exports write `null` where a field was never set; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// Joined records (pipeline output)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub name: String,
    pub complete: bool,
}

impl From<&CheckItem> for ChecklistItem {
    fn from(item: &CheckItem) -> Self {
        Self {
            name: item.name.clone(),
            complete: item.state == COMPLETE_STATE,
        }
    }
}

/// A checklist resolved from a card's checklist id. Item order is snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChecklist {
    pub id: String,
    pub name: String,
    pub items: Vec<ChecklistItem>,
}

impl From<&Checklist> for ResolvedChecklist {
    fn from(checklist: &Checklist) -> Self {
        Self {
            id: checklist.id.clone(),
            name: checklist.name.clone(),
            items: checklist.check_items.iter().map(ChecklistItem::from).collect(),
        }
    }
}

/// A card assigned to the target member, joined with its checklists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub name: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub url: Option<String>,
    pub labels: Vec<String>,
    pub checklists: Vec<ResolvedChecklist>,
}

impl CardRecord {
    /// Names of checklist items marked complete, across all checklists in order.
    pub fn completed_items(&self) -> impl Iterator<Item = &str> {
        self.checklists
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|item| item.complete)
            .map(|item| item.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_deserializes_export_field_names() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "name": "Fix bug",
            "desc": "Null pointer in login",
            "due": "2024-03-01T17:00:00.000Z",
            "url": "https://trello.com/c/abc",
            "labels": [{"name": "Backend", "color": "green"}],
            "idMembers": ["m1", "m2"],
            "idChecklists": ["c1"],
            "closed": false
        }))
        .unwrap();

        assert_eq!(card.name, "Fix bug");
        assert_eq!(card.labels[0].name, "Backend");
        assert_eq!(card.id_checklists, vec!["c1"]);
        assert!(card.is_assigned_to("m2"));
        assert!(!card.is_assigned_to("m3"));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "name": "Orphan",
            "desc": null,
            "labels": null,
            "idMembers": null,
            "idChecklists": null
        }))
        .unwrap();

        assert!(card.desc.is_none());
        assert!(card.labels.is_empty());
        assert!(card.id_members.is_empty());
        assert!(card.id_checklists.is_empty());
    }

    #[test]
    fn test_only_literal_complete_state_counts_as_done() {
        for (state, expected) in [
            ("complete", true),
            ("incomplete", false),
            ("Complete", false),
            ("done", false),
            ("", false),
        ] {
            let item = CheckItem {
                name: "step".to_string(),
                state: state.to_string(),
            };
            assert_eq!(
                ChecklistItem::from(&item).complete,
                expected,
                "state {state:?}"
            );
        }
    }

    #[test]
    fn test_completed_items_spans_checklists_in_order() {
        let record = CardRecord {
            name: "Ship it".to_string(),
            description: None,
            due: None,
            url: None,
            labels: vec![],
            checklists: vec![
                ResolvedChecklist {
                    id: "c1".to_string(),
                    name: "Build".to_string(),
                    items: vec![
                        ChecklistItem { name: "Compile".to_string(), complete: true },
                        ChecklistItem { name: "Lint".to_string(), complete: false },
                    ],
                },
                ResolvedChecklist {
                    id: "c2".to_string(),
                    name: "Release".to_string(),
                    items: vec![ChecklistItem { name: "Tag".to_string(), complete: true }],
                },
            ],
        };

        let done: Vec<&str> = record.completed_items().collect();
        assert_eq!(done, vec!["Compile", "Tag"]);
    }
}
