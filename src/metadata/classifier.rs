//! Reparto de etiquetas entre el grupo sensible y el de propiedades.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::value::TagMap;

/// Palabras clave que marcan una etiqueta como sensible. La comparación es
/// por subcadena sin distinguir mayúsculas, así que `GPS` cubre todo el IFD
/// de GPS y `DateTime` sus tres variantes. `Software` queda fuera a propósito:
/// solo `ProcessingSoftware` es sensible.
pub const SENSITIVE_KEYWORDS: [&str; 11] = [
    "GPS",
    "DateTime",
    "UserComment",
    "ImageDescription",
    "Artist",
    "Copyright",
    "CameraOwnerName",
    "BodySerialNumber",
    "LensSerialNumber",
    "ProcessingSoftware",
    "HostComputer",
];

const MAKER_NOTE: &str = "MakerNote";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Sensitive,
    Properties,
    /// Bloques propietarios del fabricante que nunca se muestran.
    Excluded,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    pub sensitive: TagMap,
    pub properties: TagMap,
    pub excluded: BTreeSet<String>,
}

pub fn classify_tag(name: &str) -> Classification {
    let lowered = name.to_lowercase();

    if lowered.contains("maker") || name == MAKER_NOTE {
        return Classification::Excluded;
    }

    let sensitive = SENSITIVE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()));

    if sensitive {
        Classification::Sensitive
    } else {
        Classification::Properties
    }
}

pub fn classify(tags: &TagMap) -> Partition {
    let mut partition = Partition::default();

    for (name, value) in tags {
        match classify_tag(name) {
            Classification::Sensitive => {
                partition.sensitive.insert(name.clone(), value.clone());
            }
            Classification::Properties => {
                partition.properties.insert(name.clone(), value.clone());
            }
            Classification::Excluded => {
                partition.excluded.insert(name.clone());
            }
        }
    }

    partition
}
