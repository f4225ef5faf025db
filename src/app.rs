use crate::download::{SaveResult, save_download};
use crate::ui;
use console::style;
use exiflens::ExifLensOptions;
use exiflens::error::{ExifLensError, ExifLensResult};
use exiflens::session::{
    Dispatcher, DownloadFile, Effect, IncomingFile, Intent, RedactionJob, SessionView, Transition,
    sniff_media_type,
};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

pub fn run() -> Result<(), String> {
    let options = ExifLensOptions::from_env();
    let mut state =
        AppState::new(options).map_err(|error| format!("No se pudo inicializar ExifLens: {error}"))?;

    ui::render_header();
    ui::render_intro();

    let mut input = String::new();
    loop {
        match read_user_input(&mut input) {
            Ok(None) => {
                println!("\n{}", style("Fin de la entrada. ¡Hasta luego!").dim());
                break;
            }
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }

                if matches_command(&line, &["exit", "salir"]) {
                    println!("{}", style("Hasta luego!").dim());
                    break;
                }

                if matches_command(&line, &["ayuda", "help"]) {
                    ui::render_help();
                    continue;
                }

                if let Err(message) = handle_input(&mut state, &line) {
                    ui::render_error(&message);
                }
            }
            Err(error) => {
                eprintln!("Error al leer la entrada: {error}");
            }
        }
    }

    Ok(())
}

fn matches_command(input: &str, aliases: &[&str]) -> bool {
    aliases
        .iter()
        .any(|alias| input.eq_ignore_ascii_case(alias))
}

struct AppState {
    current_dir: PathBuf,
    dispatcher: Dispatcher,
    last_view: SessionView,
    loaded_path: Option<PathBuf>,
}

impl AppState {
    fn new(options: ExifLensOptions) -> io::Result<Self> {
        let dispatcher = Dispatcher::new(options);
        let last_view = dispatcher.view();
        Ok(Self {
            current_dir: env::current_dir()?,
            dispatcher,
            last_view,
            loaded_path: None,
        })
    }

    fn resolve_path(&self, input: &str) -> PathBuf {
        let candidate = Path::new(input);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.current_dir.join(candidate)
        }
    }

    fn dispatch(&mut self, intent: Intent) -> ExifLensResult<Transition> {
        let result = self.dispatcher.dispatch(intent);
        // Incluso tras un error la vista refleja el estado real de la sesión.
        self.last_view = match &result {
            Ok(transition) => transition.view.clone(),
            Err(_) => self.dispatcher.view(),
        };
        result
    }
}

fn handle_input(state: &mut AppState, raw_input: &str) -> Result<(), String> {
    let trimmed = raw_input.trim();
    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("");
    let remainder = trimmed[command.len()..].trim();

    match command.to_ascii_lowercase().as_str() {
        "abrir" | "open" => {
            if remainder.is_empty() {
                return Err("Debes indicar la ruta de la imagen.".to_string());
            }
            open_image(state, remainder)
        }
        "marcar" | "toggle" => toggle_by_index(state, remainder),
        "ver" | "info" => show_full_value(state, remainder),
        "descargar" | "download" => download(state, remainder),
        "reiniciar" | "reset" => {
            let transition = state.dispatch(Intent::Reset).map_err(|e| e.to_string())?;
            state.loaded_path = None;
            ui::render_view(&transition.view);
            Ok(())
        }
        _ => {
            if trimmed.parse::<usize>().is_ok() {
                return toggle_by_index(state, trimmed);
            }
            open_image(state, trimmed)
        }
    }
}

fn open_image(state: &mut AppState, input: &str) -> Result<(), String> {
    let path = state.resolve_path(input);
    let bytes = fs::read(&path)
        .map_err(|error| format!("No se pudo leer `{}`: {error}", path.display()))?;

    let name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    let media_type = sniff_media_type(&bytes);

    let transition = state
        .dispatch(Intent::FileAccepted(IncomingFile::new(name, media_type, bytes)))
        .map_err(|e| e.to_string())?;

    state.loaded_path = Some(path);
    // El aviso de imagen sin metadata ya forma parte de la vista.
    ui::render_view(&transition.view);
    Ok(())
}

fn parse_index(input: &str) -> Result<usize, String> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|index| *index > 0)
        .ok_or_else(|| "Debes indicar un número de fila positivo.".to_string())
}

fn toggle_by_index(state: &mut AppState, input: &str) -> Result<(), String> {
    let index = parse_index(input)?;
    let key = state
        .last_view
        .entry_by_index(index)
        .map(|entry| entry.key.clone())
        .ok_or_else(|| "Índice fuera de rango. Revisa la tabla de metadata.".to_string())?;

    let transition = state
        .dispatch(Intent::ToggleTagSelection(key))
        .map_err(|e| e.to_string())?;
    ui::render_view(&transition.view);
    Ok(())
}

fn show_full_value(state: &AppState, input: &str) -> Result<(), String> {
    let index = parse_index(input)?;
    let entry = state
        .last_view
        .entry_by_index(index)
        .ok_or_else(|| "Índice fuera de rango. Revisa la tabla de metadata.".to_string())?;
    ui::render_full_value(index, entry);
    Ok(())
}

fn download(state: &mut AppState, target: &str) -> Result<(), String> {
    let directory = if target.is_empty() {
        state
            .loaded_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| state.current_dir.clone())
    } else {
        state.resolve_path(target)
    };

    let transition = state
        .dispatch(Intent::RequestDownload)
        .map_err(|e| e.to_string())?;
    let Effect::Redact(job) = transition.effect else {
        return Err("No se pudo iniciar la limpieza.".to_string());
    };

    println!("\n{}", style("│ Procesando imagen...").dim());
    let timeout = state.dispatcher.options().redaction_timeout();
    let result = run_job_with_timeout(job, timeout);

    let finished = state
        .dispatch(Intent::RedactionFinished(result))
        .map_err(|e| e.to_string())?;

    if let Effect::Save(file) = &finished.effect {
        store(file, &directory, state.loaded_path.as_deref())?;
    }
    if let Some(notice) = &finished.notice {
        ui::render_notice(notice);
    }
    Ok(())
}

fn store(file: &DownloadFile, directory: &Path, source: Option<&Path>) -> Result<(), String> {
    match save_download(file, directory, source)? {
        SaveResult::Written(path) => ui::render_download(file, &path.display().to_string(), false),
        SaveResult::AlreadyInPlace(path) => {
            ui::render_download(file, &path.display().to_string(), true)
        }
    }
    Ok(())
}

/// Ejecuta la limpieza en un hilo aparte y la abandona si excede `timeout`.
fn run_job_with_timeout(job: RedactionJob, timeout: Duration) -> ExifLensResult<DownloadFile> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = sender.send(job.run());
    });

    match receiver.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(ExifLensError::ReencodeFailed(format!(
            "tiempo de espera excedido ({} s)",
            timeout.as_secs()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(ExifLensError::ReencodeFailed(
            "no se pudo completar la limpieza".to_string(),
        )),
    }
}

fn read_user_input(buffer: &mut String) -> io::Result<Option<String>> {
    print!("{} ", style("ExifLens").bold().cyan());
    print!("{} ", style("›").cyan());
    io::stdout().flush()?;

    buffer.clear();
    let bytes_read = io::stdin().read_line(buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim_end().to_string()))
}
