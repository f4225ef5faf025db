//! Sesión de trabajo sobre una imagen y la máquina de estados que la gobierna.

mod dispatcher;
mod intake;
mod state;
mod view;

pub use dispatcher::{
    Dispatcher, DownloadFile, Effect, Intent, RedactionJob, SessionState, Transition,
};
pub use intake::{IncomingFile, sniff_media_type, validate_incoming};
pub use state::{Session, SourceImage};
pub use view::{FileSummary, SessionView};
