//! Modelo de valores de etiqueta tal como los entrega el decodificador.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Mapa de nombre de etiqueta a valor para una imagen cargada.
pub type TagMap = BTreeMap<String, TagValue>;

/// Conjunto de etiquetas que el usuario marcó para eliminar.
pub type SelectionSet = BTreeSet<String>;

#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    Number(f64),
    Text(String),
    Rational { numerator: i64, denominator: i64 },
    Sequence(Vec<TagValue>),
    Null,
}

/// Conversión a texto equivalente a la del decodificador: los enteros se
/// muestran sin parte decimal y las secuencias como JSON.
impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Number(value) => write!(f, "{value}"),
            TagValue::Text(text) => f.write_str(text),
            TagValue::Rational {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
            TagValue::Sequence(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            TagValue::Null => f.write_str("null"),
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Number(value) => {
                if is_whole(*value) {
                    serializer.serialize_i64(*value as i64)
                } else {
                    serializer.serialize_f64(*value)
                }
            }
            TagValue::Text(text) => serializer.serialize_str(text),
            TagValue::Rational {
                numerator,
                denominator,
            } => match rational_quotient(*numerator, *denominator) {
                Some(value) if is_whole(value) => serializer.serialize_i64(value as i64),
                Some(value) => serializer.serialize_f64(value),
                None => serializer.serialize_none(),
            },
            TagValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TagValue::Null => serializer.serialize_none(),
        }
    }
}

/// Un denominador cero no tiene cociente y se serializa como `null`.
fn rational_quotient(numerator: i64, denominator: i64) -> Option<f64> {
    (denominator != 0).then(|| numerator as f64 / denominator as f64)
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::TagValue;

    #[test]
    fn numbers_display_like_the_decoder() {
        assert_eq!(TagValue::Number(72.0).to_string(), "72");
        assert_eq!(TagValue::Number(2.8).to_string(), "2.8");
        assert_eq!(TagValue::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn sequences_serialize_as_json() {
        let value = TagValue::Sequence(vec![
            TagValue::Number(1.0),
            TagValue::Text("a".into()),
            TagValue::Rational {
                numerator: 3,
                denominator: 4,
            },
            TagValue::Null,
            TagValue::Number(0.5),
        ]);

        assert_eq!(
            value.to_string(),
            r#"[1,"a",0.75,null,0.5]"#
        );
    }

    #[test]
    fn rationals_serialize_as_their_quotient() -> Result<(), serde_json::Error> {
        let whole = TagValue::Rational {
            numerator: 40,
            denominator: 1,
        };
        let zero_denominator = TagValue::Rational {
            numerator: 5,
            denominator: 0,
        };

        assert_eq!(serde_json::to_string(&whole)?, "40");
        assert_eq!(serde_json::to_string(&zero_denominator)?, "null");
        assert_eq!(whole.to_string(), "40/1");
        Ok(())
    }
}
