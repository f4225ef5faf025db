//! Orden de presentación de cada grupo de etiquetas.

use serde::{Deserialize, Serialize};

use super::value::{TagMap, TagValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Sensitive,
    Properties,
}

/// Secuencia ordenada de pares (nombre, valor) lista para mostrarse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderedGroup {
    entries: Vec<(String, TagValue)>,
}

impl OrderedGroup {
    pub fn entries(&self) -> &[(String, TagValue)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn to_tag_map(&self) -> TagMap {
        self.entries.iter().cloned().collect()
    }
}

/// Ordena un grupo en tres cubetas de prioridad fija; dentro de cada cubeta
/// el orden es lexicográfico y sensible a mayúsculas.
///
/// * Sensible: fecha/hora, luego GPS, luego el resto.
/// * Propiedades: `Make`/`Model`, luego software, luego el resto.
pub fn order(group: &TagMap, kind: GroupKind) -> OrderedGroup {
    let mut buckets: [Vec<(String, TagValue)>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for (key, value) in group {
        let bucket = match kind {
            GroupKind::Sensitive => sensitive_bucket(key),
            GroupKind::Properties => properties_bucket(key),
        };
        buckets[bucket].push((key.clone(), value.clone()));
    }

    let entries = buckets
        .into_iter()
        .flat_map(|mut bucket| {
            bucket.sort_by(|(a, _), (b, _)| a.cmp(b));
            bucket
        })
        .collect();

    OrderedGroup { entries }
}

fn sensitive_bucket(key: &str) -> usize {
    let lowered = key.to_lowercase();
    if lowered.contains("date") || lowered.contains("time") {
        0
    } else if lowered.contains("gps") {
        1
    } else {
        2
    }
}

fn properties_bucket(key: &str) -> usize {
    let lowered = key.to_lowercase();
    if lowered == "make" || lowered == "model" {
        0
    } else if lowered.contains("software") {
        1
    } else {
        2
    }
}
