//! Guardado de la imagen resultante en disco.

use exiflens::session::DownloadFile;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, PartialEq, Eq)]
pub enum SaveResult {
    Written(PathBuf),
    /// El destino es el propio archivo de origen y los bytes no cambiaron.
    AlreadyInPlace(PathBuf),
}

/// Escribe `file` dentro de `directory` pasando por un archivo temporal, de
/// modo que nunca queda un archivo a medio escribir con el nombre final.
pub fn save_download(
    file: &DownloadFile,
    directory: &Path,
    source: Option<&Path>,
) -> Result<SaveResult, String> {
    if !directory.is_dir() {
        return Err(format!(
            "`{}` no es un directorio válido para guardar",
            directory.display()
        ));
    }

    let destination = directory.join(&file.file_name);

    if !file.stripped && source.is_some_and(|path| same_file(path, &destination)) {
        return Ok(SaveResult::AlreadyInPlace(destination));
    }

    let temp_path = generate_temp_filename(&destination);
    fs::write(&temp_path, &file.bytes)
        .map_err(|e| format!("No se pudo escribir la imagen: {}", e))?;

    fs::rename(&temp_path, &destination).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        format!("No se pudo guardar `{}`: {}", destination.display(), e)
    })?;

    Ok(SaveResult::Written(destination))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Crea un nombre de archivo temporal oculto en el mismo directorio que `path`.
fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    parent.join(format!(".{}_temp_{}.{}", stem, timestamp, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn download(name: &str, bytes: &[u8], stripped: bool) -> DownloadFile {
        DownloadFile {
            file_name: name.to_string(),
            media_type: "image/jpeg".to_string(),
            bytes: bytes.to_vec(),
            stripped,
        }
    }

    #[test]
    fn writes_file_into_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;

        let result = save_download(&download("cleaned_a.jpg", b"limpio", true), dir.path(), None)?;

        let expected = dir.path().join("cleaned_a.jpg");
        assert_eq!(result, SaveResult::Written(expected.clone()));
        assert_eq!(fs::read(&expected)?, b"limpio");

        let leftovers: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[test]
    fn unchanged_file_onto_its_source_is_a_noop() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let source = dir.path().join("a.jpg");
        fs::write(&source, b"original")?;

        let result = save_download(
            &download("a.jpg", b"original", false),
            dir.path(),
            Some(source.as_path()),
        )?;

        assert_eq!(result, SaveResult::AlreadyInPlace(dir.path().join("a.jpg")));
        assert_eq!(fs::read(&source)?, b"original");
        Ok(())
    }

    #[test]
    fn rejects_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("no-existe");

        assert!(save_download(&download("a.jpg", b"x", true), &missing, None).is_err());
        Ok(())
    }
}
