//! Conversión de nombres y valores de etiqueta a texto presentable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::TagValue;

/// Longitud a partir de la cual un valor se muestra recortado.
pub const TRUNCATE_LIMIT: usize = 100;

const NOT_AVAILABLE: &str = "N/A";

/// Valor listo para mostrar. La variante recortada conserva también el texto
/// completo para que la interfaz pueda expandirlo sin volver a consultar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayValue {
    Text { text: String },
    Truncated { preview: String, full: String },
}

impl DisplayValue {
    pub fn text(text: impl Into<String>) -> Self {
        DisplayValue::Text { text: text.into() }
    }

    pub fn full_text(&self) -> &str {
        match self {
            DisplayValue::Text { text } => text,
            DisplayValue::Truncated { full, .. } => full,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, DisplayValue::Truncated { .. })
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text { text } => f.write_str(text),
            DisplayValue::Truncated { preview, .. } => write!(f, "{preview}…"),
        }
    }
}

/// Separa las palabras de un nombre en camel case: `ExposureTime` pasa a
/// `Exposure Time`. Cada mayúscula recibe su propio espacio, de modo que las
/// siglas quedan deletreadas (`GPSLatitude` → `G P S Latitude`).
pub fn format_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() * 2);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    capitalized.trim().to_string()
}

pub fn format_value(key: &str, value: &TagValue) -> DisplayValue {
    match value {
        TagValue::Null => return DisplayValue::text(NOT_AVAILABLE),
        TagValue::Rational {
            numerator,
            denominator,
        } => return DisplayValue::text(format!("{numerator}/{denominator}")),
        TagValue::Sequence(_) => {
            let json = serde_json::to_string(value).unwrap_or_else(|_| value.to_string());
            return DisplayValue::text(json);
        }
        TagValue::Number(number) if key.contains("GPS") => {
            return DisplayValue::text(format!("{number:.6}"));
        }
        _ => {}
    }

    let text = value.to_string();

    if key.contains("Date") || key.contains("Time") {
        return DisplayValue::text(text);
    }

    truncate(text)
}

fn truncate(text: String) -> DisplayValue {
    match text.char_indices().nth(TRUNCATE_LIMIT) {
        Some((cut, _)) => DisplayValue::Truncated {
            preview: text[..cut].to_string(),
            full: text,
        },
        None => DisplayValue::Text { text },
    }
}
