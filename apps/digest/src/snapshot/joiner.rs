//! Card Joiner — filters cards to one member and resolves their checklists.

use std::collections::HashMap;

use tracing::debug;

use crate::snapshot::models::{Card, CardRecord, Checklist, ResolvedChecklist, Snapshot};

/// Joins every card assigned to `member_id` with its checklists and labels.
///
/// Output order is card order in the snapshot. Checklist ids that do not
/// resolve to a checklist in the same snapshot are skipped.
pub fn join_cards(snapshot: &Snapshot, member_id: &str) -> Vec<CardRecord> {
    let checklists = index_checklists(&snapshot.checklists);

    let records: Vec<CardRecord> = snapshot
        .cards
        .iter()
        .filter(|card| card.is_assigned_to(member_id))
        .map(|card| build_record(card, &checklists))
        .collect();

    debug!(
        "Joined {} of {} cards for member {}",
        records.len(),
        snapshot.cards.len(),
        member_id
    );

    records
}

/// Built once per join. On a duplicated id the first checklist is kept.
fn index_checklists(checklists: &[Checklist]) -> HashMap<&str, &Checklist> {
    let mut index = HashMap::with_capacity(checklists.len());
    for checklist in checklists {
        index.entry(checklist.id.as_str()).or_insert(checklist);
    }
    index
}

fn build_record(card: &Card, checklists: &HashMap<&str, &Checklist>) -> CardRecord {
    let resolved = card
        .id_checklists
        .iter()
        .filter_map(|id| match checklists.get(id.as_str()) {
            Some(checklist) => Some(ResolvedChecklist::from(*checklist)),
            None => {
                debug!("Card '{}' references unknown checklist {}", card.name, id);
                None
            }
        })
        .collect();

    CardRecord {
        name: card.name.clone(),
        description: non_blank(card.desc.as_deref()),
        due: non_blank(card.due.as_deref()),
        url: non_blank(card.url.as_deref()),
        labels: card.labels.iter().map(|l| l.name.clone()).collect(),
        checklists: resolved,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
