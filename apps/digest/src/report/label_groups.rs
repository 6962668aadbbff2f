//! Label Aggregator — buckets card records by label name.
//!
//! Groups borrow the records; a record with N labels is referenced from N
//! groups, never copied. Iteration follows first-seen label order.

use std::collections::HashMap;

use crate::snapshot::models::CardRecord;

#[derive(Debug)]
pub struct LabelGroup<'a> {
    pub label: &'a str,
    pub cards: Vec<&'a CardRecord>,
}

#[derive(Debug, Default)]
pub struct LabelGroups<'a> {
    groups: Vec<LabelGroup<'a>>,
    index: HashMap<&'a str, usize>,
    /// Records with no labels. They appear in no group.
    pub unlabeled: usize,
}

impl<'a> LabelGroups<'a> {
    /// Cards under `label`, or `None` if no record carries it.
    pub fn get(&self, label: &str) -> Option<&[&'a CardRecord]> {
        self.index
            .get(label)
            .map(|&idx| self.groups[idx].cards.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, label: &'a str, record: &'a CardRecord) {
        let idx = match self.index.get(label) {
            Some(&idx) => idx,
            None => {
                self.groups.push(LabelGroup {
                    label,
                    cards: Vec::new(),
                });
                self.index.insert(label, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let cards = &mut self.groups[idx].cards;
        // A label repeated on the same card adds that card once.
        if cards.last().is_some_and(|last| std::ptr::eq(*last, record)) {
            return;
        }
        cards.push(record);
    }
}

/// Groups records by exact label name, preserving record order inside each group.
pub fn group_by_label(records: &[CardRecord]) -> LabelGroups<'_> {
    let mut groups = LabelGroups::default();
    for record in records {
        if record.labels.is_empty() {
            groups.unlabeled += 1;
            continue;
        }
        for label in &record.labels {
            groups.push(label.as_str(), record);
        }
    }
    groups
}
