//! Comprobación de que una imagen ya no contiene campos EXIF.

use std::io::Cursor;

use super::RedactionError;

/// Comprueba que los bytes carecen de campos EXIF residuales.
///
/// Se aplica a bytes recién codificados por `JpegEncoder`, que nunca escribe
/// un segmento APP1. Si el lector no reconoce un contenedor EXIF en ellos
/// (`InvalidFormat`), no hay metadata que quitar y la imagen cuenta como limpia.
pub fn verify_metadata_clean(bytes: &[u8]) -> Result<bool, RedactionError> {
    let mut reader = Cursor::new(bytes);

    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(exif.fields().next().is_none()),
        Err(exif::Error::NotFound(_)) | Err(exif::Error::BlankValue(_)) => Ok(true),
        Err(exif::Error::InvalidFormat(_)) => Ok(true),
        Err(exif::Error::Io(err)) => Err(RedactionError::ReencodeFailed(format!(
            "no se pudo leer metadata EXIF durante la verificación: {err}"
        ))),
        Err(other) => Err(RedactionError::ReencodeFailed(format!(
            "error verificando metadata EXIF: {other}"
        ))),
    }
}
