//! Imágenes de prueba generadas en memoria.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;

/// JPEG de 16x16 sin ningún segmento EXIF.
pub fn plain_jpeg() -> Vec<u8> {
    sized_jpeg(16, 16)
}

fn sized_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 8) as u8, (y * 8) as u8, 128])
    });
    let mut output = Vec::new();
    JpegEncoder::new_with_quality(&mut output, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("la codificación del JPEG de prueba falló");
    output
}

/// JPEG apaisado de 32x8 cuya etiqueta `Orientation` pide girarlo 90°.
pub fn rotated_jpeg() -> Vec<u8> {
    let fields = vec![Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![6]),
    }];
    insert_exif_segment(&sized_jpeg(32, 8), &write_tiff(&fields))
}

/// JPEG con etiquetas de cámara, GPS, autoría y una nota del fabricante.
pub fn jpeg_with_exif() -> Vec<u8> {
    let fields = vec![
        ascii_field(Tag::Make, "Canon"),
        ascii_field(Tag::Model, "EOS 5D"),
        ascii_field(Tag::Software, "Firmware 1.0"),
        ascii_field(Tag::Artist, "Ana Pérez"),
        ascii_field(Tag::DateTimeOriginal, "2024:05:01 12:30:00"),
        Field {
            tag: Tag::Orientation,
            ifd_num: In::PRIMARY,
            value: Value::Short(vec![1]),
        },
        Field {
            tag: Tag::ExposureTime,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational { num: 1, denom: 250 }]),
        },
        Field {
            tag: Tag::MakerNote,
            ifd_num: In::PRIMARY,
            value: Value::Undefined(vec![0, 1, 2, 3, 4, 5], 0),
        },
        ascii_field(Tag::GPSLatitudeRef, "N"),
        Field {
            tag: Tag::GPSLatitude,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![
                Rational { num: 40, denom: 1 },
                Rational { num: 26, denom: 1 },
                Rational {
                    num: 4621,
                    denom: 100,
                },
            ]),
        },
    ];

    insert_exif_segment(&plain_jpeg(), &write_tiff(&fields))
}

fn write_tiff(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer
        .write(&mut tiff, false)
        .expect("la escritura del bloque EXIF de prueba falló");
    tiff.into_inner()
}

fn ascii_field(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

/// Inserta un segmento APP1 `Exif` justo después del marcador SOI.
fn insert_exif_segment(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    const EXIF_HEADER: &[u8] = b"Exif\0\0";
    let length = u16::try_from(2 + EXIF_HEADER.len() + tiff.len())
        .expect("el bloque EXIF de prueba no cabe en un segmento APP1");

    let mut output = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    output.extend_from_slice(&jpeg[..2]);
    output.extend_from_slice(&[0xFF, 0xE1]);
    output.extend_from_slice(&length.to_be_bytes());
    output.extend_from_slice(EXIF_HEADER);
    output.extend_from_slice(tiff);
    output.extend_from_slice(&jpeg[2..]);
    output
}
