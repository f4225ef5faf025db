//! Estado de la imagen cargada: bytes, etiquetas y selección del usuario.

use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::debug;

use crate::metadata::{GroupKind, OrderedGroup, SelectionSet, TagMap, classify, order};

#[derive(Clone, Debug)]
pub struct SourceImage {
    pub name: String,
    pub declared_media_type: Option<String>,
    pub bytes: Arc<[u8]>,
    pub loaded_at: DateTime<Local>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, declared_media_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_media_type,
            bytes: Arc::from(bytes),
            loaded_at: Local::now(),
        }
    }
}

/// Sesión de una sola imagen. Cargar otra imagen la reemplaza por completo;
/// nada se mezcla con la anterior.
#[derive(Clone, Debug, Default)]
pub struct Session {
    image: Option<SourceImage>,
    tags: TagMap,
    sensitive: OrderedGroup,
    properties: OrderedGroup,
    selection: SelectionSet,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, image: SourceImage, tags: TagMap) {
        let partition = classify(&tags);
        debug!(
            sensitive = partition.sensitive.len(),
            properties = partition.properties.len(),
            excluded = partition.excluded.len(),
            "metadata clasificada"
        );

        self.sensitive = order(&partition.sensitive, GroupKind::Sensitive);
        self.properties = order(&partition.properties, GroupKind::Properties);
        self.image = Some(image);
        self.tags = tags;
        self.selection.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    pub fn group(&self, kind: GroupKind) -> &OrderedGroup {
        match kind {
            GroupKind::Sensitive => &self.sensitive,
            GroupKind::Properties => &self.properties,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Indica si la etiqueta se muestra en alguno de los dos grupos.
    pub fn is_displayed(&self, name: &str) -> bool {
        self.sensitive.keys().any(|key| key == name)
            || self.properties.keys().any(|key| key == name)
    }

    /// Alterna la marca de una etiqueta y devuelve si quedó seleccionada.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.selection.remove(name) {
            false
        } else {
            self.selection.insert(name.to_string());
            true
        }
    }
}
