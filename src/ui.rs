use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Row, Table};
use console::style;
use exiflens::metadata::{EntryLevel, ReportSection, SectionNotice, TagEntry};
use exiflens::session::{DownloadFile, SessionView};

const HEADER_WIDTH: usize = 74;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("\n{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ ExifLens · Limpieza de Metadata en Imágenes JPEG ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn render_intro() {
    println!(
        "{}",
        style("Escribe la ruta de una imagen JPEG para ver su metadata.").dim()
    );
    println!(
        "{}\n",
        style("Escribe 'ayuda' para ver los comandos o 'salir' para terminar.").dim()
    );
}

pub fn render_help() {
    let hint_lines = [
        "┌─ Comandos disponibles:",
        "│   • <ruta> o abrir <ruta>    Carga una imagen (.jpg, .jpeg)",
        "│   • <n> o marcar <n>         Marca o desmarca la etiqueta n para eliminar",
        "│   • ver <n>                  Muestra el valor completo de la etiqueta n",
        "│   • descargar [directorio]   Guarda la imagen (limpia si marcaste algo)",
        "│   • reiniciar                Descarta la imagen actual",
        "│   • salir                    Termina ExifLens",
        "└─",
    ];

    for line in hint_lines.iter() {
        println!("{}", style(line).cyan().dim());
    }

    println!();
}

pub fn render_view(view: &SessionView) {
    let Some(file) = &view.file else {
        println!("{}", style("No hay ninguna imagen cargada.").dim());
        return;
    };

    println!();
    print_property("Archivo", &file.name);
    print_property("Tamaño", &file.size);
    print_property("Tipo", &file.media_type);
    print_property("Cargada", &file.loaded_at);

    if let Some(notice) = &view.notice {
        render_notice(notice);
    }

    let mut index = 1;
    for section in [&view.sensitive, &view.properties] {
        render_section(section, &mut index);
    }

    let pending = if view.selected == 0 {
        "Ninguna etiqueta marcada: la descarga entregará el archivo original.".to_string()
    } else {
        format!(
            "{} etiqueta(s) marcada(s): la descarga eliminará TODA la metadata.",
            view.selected
        )
    };
    println!("{}\n", style(pending).dim());
}

fn render_section(section: &ReportSection, index: &mut usize) {
    println!("\n{}", style(format!("┌─ {} ─", section.title)).cyan().bold());

    if let Some(notice) = &section.notice {
        println!("{}", style(format!("│ {}", notice.message)).dim());
        println!("{}", style("└─").cyan());
        return;
    }

    let mut table = base_table();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Etiqueta"),
        header_cell("Valor"),
        header_cell("Quitar"),
    ]);

    for entry in &section.entries {
        table.add_row(entry_row(*index, entry));
        *index += 1;
    }

    println!("{table}");
}

fn entry_row(index: usize, entry: &TagEntry) -> Row {
    let label_color = match entry.level {
        EntryLevel::Warning => Color::Yellow,
        _ => Color::Rgb {
            r: 160,
            g: 196,
            b: 255,
        },
    };

    let value = if entry.value.is_truncated() {
        format!("{} (ver {index})", entry.value)
    } else {
        entry.value.to_string()
    };

    let mark = if entry.selected {
        Cell::new("✔").fg(Color::Green)
    } else {
        Cell::new("·").fg(Color::DarkGrey)
    };

    Row::from(vec![
        Cell::new(index).fg(Color::DarkGrey),
        Cell::new(&entry.label).fg(label_color),
        Cell::new(value),
        mark,
    ])
}

pub fn render_full_value(index: usize, entry: &TagEntry) {
    println!(
        "\n{} {} {}",
        style(format!("  [{index}] {}", entry.label)).cyan().bold(),
        style("→").dim(),
        entry.value.full_text()
    );
    println!();
}

pub fn render_notice(notice: &SectionNotice) {
    let line = format!("│ {}", notice.message);
    let styled = match notice.level {
        EntryLevel::Success => style(line).green(),
        EntryLevel::Warning => style(line).yellow(),
        EntryLevel::Info => style(line).cyan(),
    };
    println!("\n{styled}");
}

pub fn render_download(file: &DownloadFile, location: &str, in_place: bool) {
    let title = if file.stripped {
        "┌─ Metadata Eliminada Exitosamente ─"
    } else {
        "┌─ Imagen Original Entregada ─"
    };
    println!("\n{}", style(title).green());
    println!("{}", style(format!("│ Archivo: {location}")).green().bold());
    if in_place {
        println!(
            "{}",
            style("│ El destino es el archivo original; no fue necesario escribirlo.").green()
        );
    }
    println!("{}", style(format!("│ SHA-256: {}", file.sha256())).green());
    println!("{}", style("└─").green());
}

pub fn render_error(message: &str) {
    eprintln!("{}", style(format!("│ Error: {message}")).red());
}

fn print_property(label: &str, value: &str) {
    let label_styled = style(format!("  {}", label)).cyan().bold();
    let arrow = style("→").dim();
    println!("{} {} {}", label_styled, arrow, style(value).white());
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
        .add_attribute(Attribute::Underlined)
}
