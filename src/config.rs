//! Opciones de ejecución configurables mediante variables de entorno.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::redaction::RedactionOptions;

pub const ENV_JPEG_QUALITY: &str = "EXIFLENS_JPEG_QUALITY";
pub const ENV_TIMEOUT_SECS: &str = "EXIFLENS_TIMEOUT_SECS";
pub const ENV_VERIFY: &str = "EXIFLENS_VERIFY";

/// Calidad que usa el lienzo de los navegadores al exportar JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifLensOptions {
    pub jpeg_quality: u8,
    pub redaction_timeout_secs: u64,
    pub verify_output: bool,
}

impl Default for ExifLensOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            redaction_timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_output: true,
        }
    }
}

impl ExifLensOptions {
    /// Lee las opciones del entorno del proceso.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye las opciones a partir de una función de consulta arbitraria.
    ///
    /// Los valores ausentes o inválidos conservan el valor por defecto; los
    /// inválidos además se registran con `warn!`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(quality) = parse_var::<u8, _>(&lookup, ENV_JPEG_QUALITY) {
            if (1..=100).contains(&quality) {
                options.jpeg_quality = quality;
            } else {
                warn!(quality, "calidad JPEG fuera de rango (1-100), se ignora");
            }
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, ENV_TIMEOUT_SECS) {
            if secs > 0 {
                options.redaction_timeout_secs = secs;
            } else {
                warn!("el tiempo de espera debe ser mayor que cero, se ignora");
            }
        }

        if let Some(verify) = lookup(ENV_VERIFY) {
            match verify.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "si" | "sí" | "yes" => options.verify_output = true,
                "0" | "false" | "no" => options.verify_output = false,
                other => warn!(value = other, "valor de {ENV_VERIFY} no reconocido, se ignora"),
            }
        }

        options
    }

    pub fn redaction_timeout(&self) -> Duration {
        Duration::from_secs(self.redaction_timeout_secs)
    }

    pub fn redaction(&self) -> RedactionOptions {
        RedactionOptions {
            jpeg_quality: self.jpeg_quality,
            verify_output: self.verify_output,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw.as_str(), "valor de configuración inválido, se ignora");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let options = ExifLensOptions::from_lookup(|_| None);
        assert_eq!(options, ExifLensOptions::default());
        assert_eq!(options.jpeg_quality, 92);
        assert_eq!(options.redaction_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn reads_valid_overrides() {
        let options = ExifLensOptions::from_lookup(lookup_from(&[
            (ENV_JPEG_QUALITY, "75"),
            (ENV_TIMEOUT_SECS, " 5 "),
            (ENV_VERIFY, "no"),
        ]));

        assert_eq!(options.jpeg_quality, 75);
        assert_eq!(options.redaction_timeout_secs, 5);
        assert!(!options.verify_output);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let options = ExifLensOptions::from_lookup(lookup_from(&[
            (ENV_JPEG_QUALITY, "0"),
            (ENV_TIMEOUT_SECS, "pronto"),
            (ENV_VERIFY, "quizás"),
        ]));

        assert_eq!(options, ExifLensOptions::default());
    }
}
