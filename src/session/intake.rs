//! Validación de los archivos que entran a la sesión.

use infer::Infer;
use tracing::warn;

use crate::error::{ExifLensError, ExifLensResult};

const VALID_MEDIA_TYPES: [&str; 2] = ["image/jpeg", "image/jpg"];
const VALID_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Un archivo recibido por la interfaz, todavía sin validar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub declared_media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(
        name: impl Into<String>,
        declared_media_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_media_type,
            bytes,
        }
    }
}

/// Acepta el archivo si el tipo declarado es JPEG o si la extensión lo es.
/// Basta con que una de las dos comprobaciones pase.
pub fn validate_incoming(name: &str, declared_media_type: Option<&str>) -> ExifLensResult<()> {
    let valid_type = declared_media_type
        .map(|media| {
            VALID_MEDIA_TYPES
                .iter()
                .any(|valid| media.trim().eq_ignore_ascii_case(valid))
        })
        .unwrap_or(false);

    let lowered = name.to_lowercase();
    let valid_extension = VALID_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext));

    if valid_type || valid_extension {
        Ok(())
    } else {
        warn!(name, media_type = ?declared_media_type, "archivo rechazado");
        Err(ExifLensError::InvalidFileType {
            name: name.to_string(),
        })
    }
}

/// Intenta detectar el tipo MIME a partir del contenido.
pub fn sniff_media_type(bytes: &[u8]) -> Option<String> {
    Infer::new()
        .get(bytes)
        .map(|kind| kind.mime_type().to_string())
}
