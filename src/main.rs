mod app;
mod download;
mod ui;

use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    if env::args().len() > 1 {
        eprintln!(
            "ExifLens es interactivo y no acepta argumentos. Ejecuta solo `cargo run` o el binario sin parámetros."
        );
        std::process::exit(1);
    }

    init_tracing();

    if let Err(message) = app::run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
