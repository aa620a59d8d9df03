//! What a popup layer renders for one element.

use serde::Serialize;

use crate::{
    diagram::{ElementId, LoopMarker},
    replace::CandidateDescriptor,
};

/// Action behind a header toggle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "marker", rename_all = "snake_case")]
pub enum HeaderAction {
    /// Switch one loop marker; the three markers exclude each other.
    ToggleLoop(LoopMarker),
    /// Switch between a sub-process and an ad-hoc sub-process.
    ToggleAdHoc,
}

/// A toggle shown above the replacement entries.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub active: bool,
    pub action: HeaderAction,
}

/// Menu contents for one element, resolved when the menu opens.
///
/// Entries are a snapshot of that moment. Triggering one re-resolves
/// against the current diagram, so a stale menu can not apply an entry that
/// is no longer valid.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReplaceMenu {
    pub element: ElementId,
    pub header: Vec<HeaderEntry>,
    pub entries: Vec<CandidateDescriptor>,
}

impl ReplaceMenu {
    /// A menu without any entry, as produced by a rule veto.
    pub fn empty(element: &str) -> Self {
        Self {
            element: element.to_string(),
            header: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.entries.is_empty()
    }

    pub fn entry(
        &self,
        id: &str,
    ) -> Option<&CandidateDescriptor> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn header_entry(
        &self,
        id: &str,
    ) -> Option<&HeaderEntry> {
        self.header.iter().find(|e| e.id == id)
    }

    /// Ids of all entries, header first.
    pub fn ids(&self) -> Vec<&'static str> {
        self.header.iter().map(|e| e.id).chain(self.entries.iter().map(|e| e.id)).collect()
    }
}
