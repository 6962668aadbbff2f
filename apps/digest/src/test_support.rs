//! Shared fixtures for unit tests.

use crate::snapshot::decoder::decode_snapshot;
use crate::snapshot::models::{CardRecord, ChecklistItem, ResolvedChecklist, Snapshot};

/// One member, one assigned card with one label and a two-item checklist.
pub const FIXTURE_JSON: &str = r#"{
    "members": [{"id": "m1", "username": "alice"}],
    "cards": [{
        "name": "Fix bug",
        "idMembers": ["m1"],
        "labels": [{"name": "Backend"}],
        "idChecklists": ["c1"]
    }],
    "checklists": [{
        "id": "c1",
        "name": "Steps",
        "checkItems": [
            {"name": "Write test", "state": "complete"},
            {"name": "Deploy", "state": "incomplete"}
        ]
    }]
}"#;

pub fn fixture_snapshot() -> Snapshot {
    decode_snapshot(FIXTURE_JSON).expect("fixture snapshot must decode")
}

pub fn record(name: &str, labels: &[&str]) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        description: None,
        due: None,
        url: None,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        checklists: vec![],
    }
}

pub fn checklist(name: &str, items: &[(&str, bool)]) -> ResolvedChecklist {
    ResolvedChecklist {
        id: format!("id-{name}"),
        name: name.to_string(),
        items: items
            .iter()
            .map(|(item, complete)| ChecklistItem {
                name: item.to_string(),
                complete: *complete,
            })
            .collect(),
    }
}
