//! Motor de ExifLens: inspección y limpieza de metadata en imágenes JPEG.
//!
//! El flujo es siempre el mismo: los bytes de la imagen pasan por el
//! decodificador de etiquetas, el clasificador los reparte entre el grupo
//! sensible y el de propiedades, y el motor de redacción produce el archivo
//! de salida cuando el usuario lo pide.

pub mod config;
pub mod error;
pub mod formatting;
pub mod metadata;
pub mod redaction;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::ExifLensOptions;
pub use error::ExifLensError;
