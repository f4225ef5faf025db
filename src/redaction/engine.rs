//! Regeneración de la imagen sin metadata.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader};
use std::io::Cursor;
use tracing::{debug, info, warn};

use super::verify::verify_metadata_clean;
use super::{RedactionError, RedactionOptions, RedactionOutcome};
use crate::metadata::SelectionSet;

/// Produce los bytes de salida para una descarga.
///
/// Con la selección vacía se devuelven los bytes originales sin tocar. En
/// cualquier otro caso la imagen se decodifica y se vuelve a codificar como
/// JPEG, lo que elimina toda la metadata: la selección solo decide si se
/// limpia, no qué campos se limpian.
pub fn redact(
    original: &[u8],
    selection: &SelectionSet,
    options: &RedactionOptions,
) -> Result<RedactionOutcome, RedactionError> {
    if selection.is_empty() {
        debug!("selección vacía, se conserva el archivo original");
        return Ok(RedactionOutcome::Unchanged(original.to_vec()));
    }

    info!(
        selected = selection.len(),
        "eliminando toda la metadata de la imagen"
    );

    let stripped = reencode_jpeg(original, options.jpeg_quality)?;

    if options.verify_output && !verify_metadata_clean(&stripped)? {
        warn!("la imagen regenerada todavía contiene metadata");
        return Err(RedactionError::ReencodeFailed(
            "la verificación indicó que la metadata no se eliminó correctamente".to_string(),
        ));
    }

    debug!(
        original = original.len(),
        stripped = stripped.len(),
        "imagen regenerada"
    );

    Ok(RedactionOutcome::Stripped(stripped))
}

/// Decodifica la trama de píxeles y la vuelve a escribir como JPEG base.
///
/// La salida no lleva la etiqueta `Orientation`, así que la rotación que
/// indicaba se aplica antes a los píxeles.
pub fn reencode_jpeg(original: &[u8], quality: u8) -> Result<Vec<u8>, RedactionError> {
    let img = decode_oriented(original).map_err(|e| {
        RedactionError::ReencodeFailed(format!("no se pudo decodificar la imagen: {e}"))
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut output = Vec::new();
    JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100))
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| {
            RedactionError::ReencodeFailed(format!("no se pudo codificar la imagen limpia: {e}"))
        })?;

    Ok(output)
}

fn decode_oriented(original: &[u8]) -> image::ImageResult<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(original))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    debug!(?orientation, "orientación aplicada a la trama");
    Ok(img)
}
