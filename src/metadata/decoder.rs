//! Adaptador entre `kamadak-exif` y el modelo de etiquetas de ExifLens.

use std::io::Cursor;
use tracing::{debug, warn};

use super::value::{TagMap, TagValue};

/// Prefijo de juego de caracteres que llevan los campos `UserComment`.
const ASCII_CHARSET_PREFIX: &[u8; 8] = b"ASCII\0\0\0";

/// Fuente de etiquetas para una imagen. Un resultado vacío significa que la
/// imagen no trae metadata; no es un error.
pub trait TagDecoder {
    fn decode(&self, bytes: &[u8]) -> TagMap;
}

/// Decodificador basado en `kamadak-exif` que solo lee la imagen principal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExifDecoder;

impl TagDecoder for ExifDecoder {
    fn decode(&self, bytes: &[u8]) -> TagMap {
        let mut cursor = Cursor::new(bytes);
        let exif = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) | Err(exif::Error::BlankValue(_)) => {
                debug!("la imagen no contiene metadata EXIF");
                return TagMap::new();
            }
            Err(error) => {
                warn!(%error, "no se pudo leer la metadata EXIF");
                return TagMap::new();
            }
        };

        let mut tags = TagMap::new();
        for field in exif.fields().filter(|f| f.ifd_num == exif::In::PRIMARY) {
            tags.entry(field.tag.to_string())
                .or_insert_with(|| convert_value(&field.value));
        }

        debug!(count = tags.len(), "etiquetas EXIF decodificadas");
        tags
    }
}

/// Traduce un valor EXIF a `TagValue`: un único elemento se aplana a escalar,
/// varios forman una secuencia.
pub fn convert_value(value: &exif::Value) -> TagValue {
    use exif::Value;

    match value {
        Value::Ascii(strings) => collapse(strings.iter().map(|s| TagValue::Text(ascii_text(s)))),
        Value::Byte(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::Short(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::Long(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::SByte(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::SShort(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::SLong(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::Float(items) => numbers(items.iter().map(|&v| f64::from(v))),
        Value::Double(items) => numbers(items.iter().copied()),
        Value::Rational(items) => collapse(items.iter().map(|r| TagValue::Rational {
            numerator: i64::from(r.num),
            denominator: i64::from(r.denom),
        })),
        Value::SRational(items) => collapse(items.iter().map(|r| TagValue::Rational {
            numerator: i64::from(r.num),
            denominator: i64::from(r.denom),
        })),
        Value::Undefined(bytes, _) => undefined_value(bytes),
        #[allow(unreachable_patterns)]
        _ => TagValue::Null,
    }
}

fn numbers(items: impl Iterator<Item = f64>) -> TagValue {
    collapse(items.map(TagValue::Number))
}

fn collapse(items: impl Iterator<Item = TagValue>) -> TagValue {
    let mut values: Vec<TagValue> = items.collect();
    match values.len() {
        0 => TagValue::Null,
        1 => values.remove(0),
        _ => TagValue::Sequence(values),
    }
}

fn ascii_text(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\0', ' ', '\n', '\r', '\t'])
        .to_string()
}

fn undefined_value(bytes: &[u8]) -> TagValue {
    let payload = bytes.strip_prefix(ASCII_CHARSET_PREFIX).unwrap_or(bytes);
    let trimmed = trim_trailing_nuls(payload);

    if !trimmed.is_empty() && trimmed.iter().all(|b| (0x20..=0x7e).contains(b)) {
        return TagValue::Text(String::from_utf8_lossy(trimmed).trim_end().to_string());
    }

    numbers(bytes.iter().map(|&b| f64::from(b)))
}

fn trim_trailing_nuls(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|index| index + 1)
        .unwrap_or(0);
    &bytes[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::{Rational, Value};

    #[test]
    fn single_elements_flatten_to_scalars() {
        assert_eq!(
            convert_value(&Value::Ascii(vec![b"Canon\0".to_vec()])),
            TagValue::Text("Canon".into())
        );
        assert_eq!(convert_value(&Value::Short(vec![6])), TagValue::Number(6.0));
        assert_eq!(
            convert_value(&Value::Rational(vec![Rational { num: 1, denom: 250 }])),
            TagValue::Rational {
                numerator: 1,
                denominator: 250
            }
        );
    }

    #[test]
    fn multiple_elements_become_sequences() {
        let value = convert_value(&Value::Rational(vec![
            Rational { num: 40, denom: 1 },
            Rational { num: 26, denom: 1 },
            Rational {
                num: 4621,
                denom: 100,
            },
        ]));

        match value {
            TagValue::Sequence(items) => assert_eq!(items.len(), 3),
            other => panic!("se esperaba una secuencia, llegó {other:?}"),
        }
    }

    #[test]
    fn empty_values_are_null() {
        assert_eq!(convert_value(&Value::Long(Vec::new())), TagValue::Null);
        assert_eq!(convert_value(&Value::Ascii(Vec::new())), TagValue::Null);
    }

    #[test]
    fn undefined_ascii_becomes_text() {
        assert_eq!(
            convert_value(&Value::Undefined(b"0232".to_vec(), 0)),
            TagValue::Text("0232".into())
        );
        assert_eq!(
            convert_value(&Value::Undefined(b"ASCII\0\0\0hola mundo\0".to_vec(), 0)),
            TagValue::Text("hola mundo".into())
        );
    }

    #[test]
    fn undefined_binary_becomes_byte_sequence() {
        assert_eq!(
            convert_value(&Value::Undefined(vec![1, 2, 3, 0], 0)),
            TagValue::Sequence(vec![
                TagValue::Number(1.0),
                TagValue::Number(2.0),
                TagValue::Number(3.0),
                TagValue::Number(0.0),
            ])
        );
    }

    #[test]
    fn decodes_primary_fields_from_jpeg() {
        let tags = ExifDecoder.decode(&crate::test_support::jpeg_with_exif());

        assert_eq!(tags.get("Make"), Some(&TagValue::Text("Canon".into())));
        assert_eq!(tags.get("Orientation"), Some(&TagValue::Number(1.0)));
        assert_eq!(
            tags.get("ExposureTime"),
            Some(&TagValue::Rational {
                numerator: 1,
                denominator: 250
            })
        );
        assert!(matches!(tags.get("GPSLatitude"), Some(TagValue::Sequence(items)) if items.len() == 3));
        assert!(tags.contains_key("DateTimeOriginal"));
        assert!(tags.contains_key("MakerNote"));
    }

    #[test]
    fn bytes_without_exif_decode_to_empty_map() {
        let tags = ExifDecoder.decode(b"definitivamente no es un JPEG");
        assert!(tags.is_empty());
    }
}
