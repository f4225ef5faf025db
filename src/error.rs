//! Tipos de error compartidos por el motor y la interfaz de consola.

use std::io;
use thiserror::Error;

use crate::redaction::RedactionError;

/// Errores que el despachador puede devolver a la interfaz.
///
/// Ninguno deja la sesión a medio modificar: quien los recibe solo tiene que
/// mostrar el mensaje.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExifLensError {
    #[error("`{name}` no es una imagen JPEG válida (se aceptan .jpg y .jpeg)")]
    InvalidFileType { name: String },

    #[error("No se pudo regenerar la imagen: {0}")]
    ReencodeFailed(String),

    #[error("No hay ninguna imagen cargada")]
    NoImageLoaded,

    #[error("Hay una limpieza en curso; espera a que termine")]
    Busy,

    #[error("La etiqueta `{0}` no forma parte de la metadata mostrada")]
    UnknownTag(String),

    #[error("Se recibió el resultado de una limpieza que no estaba en curso")]
    UnexpectedCompletion,

    #[error("Error de E/S: {0}")]
    Io(String),
}

pub type ExifLensResult<T> = Result<T, ExifLensError>;

impl From<io::Error> for ExifLensError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<RedactionError> for ExifLensError {
    fn from(err: RedactionError) -> Self {
        match err {
            RedactionError::ReencodeFailed(reason) => Self::ReencodeFailed(reason),
        }
    }
}
