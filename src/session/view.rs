//! Modelo de vista que cualquier interfaz puede dibujar.

use serde::{Deserialize, Serialize};

use super::dispatcher::SessionState;
use super::state::Session;
use crate::formatting::{format_size, format_timestamp};
use crate::metadata::{GroupKind, ReportSection, SectionNotice, TagEntry};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub size: String,
    pub media_type: String,
    pub loaded_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub state: SessionState,
    pub file: Option<FileSummary>,
    pub sensitive: ReportSection,
    pub properties: ReportSection,
    pub selected: usize,
    pub notice: Option<SectionNotice>,
}

impl SessionView {
    pub fn build(state: SessionState, session: &Session) -> Self {
        let selection = session.selection();

        let file = session.image().map(|image| FileSummary {
            name: image.name.clone(),
            size: format_size(image.bytes.len() as u64),
            media_type: image
                .declared_media_type
                .clone()
                .unwrap_or_else(|| "Desconocido".to_string()),
            loaded_at: format_timestamp(&image.loaded_at),
        });

        let notice = if session.is_loaded() && session.tags().is_empty() {
            Some(SectionNotice::info(
                "No se encontró metadata EXIF en esta imagen. Puede que nunca la tuviera o que ya se haya limpiado.",
            ))
        } else {
            None
        };

        Self {
            state,
            file,
            sensitive: ReportSection::from_group(
                GroupKind::Sensitive,
                session.group(GroupKind::Sensitive),
                selection,
            ),
            properties: ReportSection::from_group(
                GroupKind::Properties,
                session.group(GroupKind::Properties),
                selection,
            ),
            selected: selection.len(),
            notice,
        }
    }

    /// Entradas de ambas secciones en el orden en que se muestran.
    pub fn entries(&self) -> impl Iterator<Item = &TagEntry> {
        self.sensitive
            .entries
            .iter()
            .chain(self.properties.entries.iter())
    }

    /// Busca una entrada por su posición visible, empezando en 1.
    pub fn entry_by_index(&self, index: usize) -> Option<&TagEntry> {
        index.checked_sub(1).and_then(|zero| self.entries().nth(zero))
    }
}
