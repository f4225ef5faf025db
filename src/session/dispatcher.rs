//! Despachador de intenciones: única puerta de entrada al estado de la sesión.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::intake::{IncomingFile, validate_incoming};
use super::state::{Session, SourceImage};
use super::view::SessionView;
use crate::config::ExifLensOptions;
use crate::error::{ExifLensError, ExifLensResult};
use crate::metadata::{ExifDecoder, SectionNotice, SelectionSet, TagDecoder};
use crate::redaction::{RedactionOptions, output_file_name, redact};

const JPEG_MEDIA_TYPE: &str = "image/jpeg";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Loaded,
    Redacting,
}

#[derive(Debug)]
pub enum Intent {
    FileAccepted(IncomingFile),
    ToggleTagSelection(String),
    RequestDownload,
    RedactionFinished(ExifLensResult<DownloadFile>),
    Reset,
}

/// Trabajo que la interfaz debe ejecutar por fuera del despachador.
#[derive(Debug)]
pub enum Effect {
    None,
    Redact(RedactionJob),
    Save(DownloadFile),
}

#[derive(Debug)]
pub struct Transition {
    pub view: SessionView,
    pub effect: Effect,
    pub notice: Option<SectionNotice>,
}

/// Archivo listo para entregarse al mecanismo de guardado del anfitrión.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub stripped: bool,
}

impl DownloadFile {
    pub fn sha256(&self) -> String {
        format!("{:x}", Sha256::digest(&self.bytes))
    }
}

/// Copia autónoma de todo lo que necesita una limpieza; puede ejecutarse en
/// otro hilo mientras la sesión permanece en `Redacting`.
#[derive(Clone, Debug)]
pub struct RedactionJob {
    source_name: String,
    declared_media_type: Option<String>,
    bytes: Arc<[u8]>,
    selection: SelectionSet,
    options: RedactionOptions,
}

impl RedactionJob {
    pub fn run(self) -> ExifLensResult<DownloadFile> {
        let outcome = redact(&self.bytes, &self.selection, &self.options)?;
        let file_name = output_file_name(&self.source_name, &outcome);
        let stripped = outcome.is_stripped();
        let media_type = if stripped {
            JPEG_MEDIA_TYPE.to_string()
        } else {
            self.declared_media_type
                .unwrap_or_else(|| JPEG_MEDIA_TYPE.to_string())
        };

        Ok(DownloadFile {
            file_name,
            media_type,
            bytes: outcome.into_bytes(),
            stripped,
        })
    }
}

pub struct Dispatcher<D = ExifDecoder> {
    decoder: D,
    options: ExifLensOptions,
    session: Session,
    state: SessionState,
}

impl Dispatcher<ExifDecoder> {
    pub fn new(options: ExifLensOptions) -> Self {
        Self::with_decoder(ExifDecoder, options)
    }
}

impl<D: TagDecoder> Dispatcher<D> {
    pub fn with_decoder(decoder: D, options: ExifLensOptions) -> Self {
        Self {
            decoder,
            options,
            session: Session::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn options(&self) -> &ExifLensOptions {
        &self.options
    }

    pub fn view(&self) -> SessionView {
        SessionView::build(self.state, &self.session)
    }

    /// Aplica una intención. Si devuelve error, la sesión queda exactamente
    /// como estaba antes de recibirla, salvo al cerrar una limpieza fallida,
    /// que vuelve a `Loaded` con las etiquetas y la selección intactas.
    pub fn dispatch(&mut self, intent: Intent) -> ExifLensResult<Transition> {
        match intent {
            Intent::FileAccepted(file) => self.accept_file(file),
            Intent::ToggleTagSelection(name) => self.toggle_tag(&name),
            Intent::RequestDownload => self.request_download(),
            Intent::RedactionFinished(result) => self.finish_redaction(result),
            Intent::Reset => self.reset(),
        }
    }

    fn accept_file(&mut self, file: IncomingFile) -> ExifLensResult<Transition> {
        self.ensure_not_redacting()?;
        validate_incoming(&file.name, file.declared_media_type.as_deref())?;

        let tags = self.decoder.decode(&file.bytes);
        info!(name = %file.name, tags = tags.len(), "imagen cargada");

        let notice = if tags.is_empty() {
            Some(SectionNotice::info("No se encontró metadata EXIF en esta imagen"))
        } else {
            None
        };

        let image = SourceImage::new(file.name, file.declared_media_type, file.bytes);
        self.session.load(image, tags);
        self.state = SessionState::Loaded;

        Ok(self.transition(Effect::None, notice))
    }

    fn toggle_tag(&mut self, name: &str) -> ExifLensResult<Transition> {
        self.ensure_loaded()?;

        if !self.session.is_displayed(name) {
            return Err(ExifLensError::UnknownTag(name.to_string()));
        }

        let selected = self.session.toggle(name);
        debug!(tag = name, selected, "selección actualizada");

        Ok(self.transition(Effect::None, None))
    }

    fn request_download(&mut self) -> ExifLensResult<Transition> {
        self.ensure_loaded()?;

        let image = self.session.image().ok_or(ExifLensError::NoImageLoaded)?;
        let job = RedactionJob {
            source_name: image.name.clone(),
            declared_media_type: image.declared_media_type.clone(),
            bytes: Arc::clone(&image.bytes),
            selection: self.session.selection().clone(),
            options: self.options.redaction(),
        };

        debug!(name = %job.source_name, selected = job.selection.len(), "limpieza solicitada");
        self.state = SessionState::Redacting;

        Ok(self.transition(Effect::Redact(job), None))
    }

    fn finish_redaction(
        &mut self,
        result: ExifLensResult<DownloadFile>,
    ) -> ExifLensResult<Transition> {
        if self.state != SessionState::Redacting {
            return Err(ExifLensError::UnexpectedCompletion);
        }
        self.state = SessionState::Loaded;

        match result {
            Ok(file) => {
                let message = if file.stripped {
                    "Imagen limpia lista: se eliminó toda la metadata"
                } else {
                    "No se marcó ninguna etiqueta: se entrega la imagen original"
                };
                info!(name = %file.file_name, stripped = file.stripped, "descarga preparada");
                Ok(self.transition(Effect::Save(file), Some(SectionNotice::success(message))))
            }
            Err(error) => {
                warn!(%error, "la limpieza falló");
                Err(error)
            }
        }
    }

    fn reset(&mut self) -> ExifLensResult<Transition> {
        self.ensure_not_redacting()?;
        self.session.reset();
        self.state = SessionState::Idle;
        Ok(self.transition(Effect::None, None))
    }

    fn ensure_not_redacting(&self) -> ExifLensResult<()> {
        if self.state == SessionState::Redacting {
            return Err(ExifLensError::Busy);
        }
        Ok(())
    }

    fn ensure_loaded(&self) -> ExifLensResult<()> {
        match self.state {
            SessionState::Idle => Err(ExifLensError::NoImageLoaded),
            SessionState::Redacting => Err(ExifLensError::Busy),
            SessionState::Loaded => Ok(()),
        }
    }

    fn transition(&self, effect: Effect, notice: Option<SectionNotice>) -> Transition {
        Transition {
            view: self.view(),
            effect,
            notice,
        }
    }
}
