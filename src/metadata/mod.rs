//! Decodificación, clasificación y presentación de la metadata de una imagen.

pub mod classifier;
pub mod decoder;
pub mod formatter;
pub mod ordering;
pub mod report;
pub mod value;

pub use classifier::{Classification, Partition, classify, classify_tag};
pub use decoder::{ExifDecoder, TagDecoder};
pub use formatter::{DisplayValue, format_key, format_value};
pub use ordering::{GroupKind, OrderedGroup, order};
pub use report::{EntryLevel, ReportSection, SectionNotice, TagEntry};
pub use value::{SelectionSet, TagMap, TagValue};
