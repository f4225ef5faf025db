//! Modelos compartidos para presentar la metadata de manera consistente.

use serde::{Deserialize, Serialize};

use super::formatter::{DisplayValue, format_key, format_value};
use super::ordering::{GroupKind, OrderedGroup};
use super::value::SelectionSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EntryLevel {
    Info,
    Warning,
    Success,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub key: String,
    pub label: String,
    pub value: DisplayValue,
    pub selected: bool,
    pub level: EntryLevel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionNotice {
    pub message: String,
    pub level: EntryLevel,
}

impl SectionNotice {
    pub fn new(message: impl Into<String>, level: EntryLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, EntryLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, EntryLevel::Success)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: GroupKind,
    pub title: String,
    pub entries: Vec<TagEntry>,
    pub notice: Option<SectionNotice>,
}

impl ReportSection {
    pub fn new(kind: GroupKind) -> Self {
        let title = match kind {
            GroupKind::Sensitive => "Metadata sensible",
            GroupKind::Properties => "Propiedades de la imagen",
        };

        Self {
            kind,
            title: title.to_string(),
            entries: Vec::new(),
            notice: None,
        }
    }

    /// Construye la sección a partir de un grupo ya ordenado, marcando las
    /// etiquetas presentes en la selección.
    pub fn from_group(kind: GroupKind, group: &OrderedGroup, selection: &SelectionSet) -> Self {
        let mut section = Self::new(kind);
        let level = match kind {
            GroupKind::Sensitive => EntryLevel::Warning,
            GroupKind::Properties => EntryLevel::Info,
        };

        section.entries = group
            .entries()
            .iter()
            .map(|(key, value)| TagEntry {
                key: key.clone(),
                label: format_key(key),
                value: format_value(key, value),
                selected: selection.contains(key),
                level,
            })
            .collect();

        if section.entries.is_empty() {
            section.notice = Some(SectionNotice::info("No hay metadata en esta categoría"));
        }

        section
    }
}
