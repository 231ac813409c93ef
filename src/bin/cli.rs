use chrono::{Datelike, Local};
use polars::prelude::{AnyValue, DataFrame};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use timetable_tool::{
    SourceLayout, SourceTable, SpreadsheetFormat, TimetableResult, Upload, calendar::parse_year,
    expand_table, load_table, logging, output_file_name, process_batch,
};

struct Loaded {
    path: PathBuf,
    format: SpreadsheetFormat,
    table: SourceTable,
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(av) = col.get(row_idx) {
                widths[ci] = widths[ci].max(cell_text(&av).chars().count());
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        let pad = widths[i] - name.chars().count();
        out.push_str(&format!(" {name}{} |", " ".repeat(pad)));
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default();
            let pad = widths[ci].saturating_sub(s.chars().count());
            out.push_str(&format!(" {s}{} |", " ".repeat(pad)));
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  year [yyyy]                        Show or set the target year\n  layout show                        Show the expected source columns and labels\n  layout default                     Use the reference column names and labels\n  layout english                     Use English column names and labels\n  layout set <json_path>             Load layout from JSON file\n  layout save <json_path>            Save current layout to JSON file\n  load <path>                        Load a source timetable (.xlsx or .csv)\n  show                               Preview the expanded timetable\n  expand [out_path]                  Write the expanded timetable\n  batch <zip_path> <in1> [in2 ...]   Expand several files into a zip archive\n  quit|exit                          Exit"
    );
}

fn print_layout(layout: &SourceLayout) {
    println!("Line column        : {}", layout.line_column);
    println!("Month column       : {}", layout.month_column);
    println!("Day type column    : {}", layout.day_type_column);
    println!("Direction column   : {}", layout.direction_column);
    println!(
        "Day type labels    : {} / {} / {}",
        layout.labels.weekday, layout.labels.saturday, layout.labels.sunday
    );
}

fn load(path: &Path, layout: &SourceLayout) -> TimetableResult<Loaded> {
    let name = path.to_string_lossy();
    let format = SpreadsheetFormat::from_file_name(&name)?;
    let bytes = fs::read(path)?;
    let table = load_table(&bytes, format, layout)?;
    Ok(Loaded {
        path: path.to_path_buf(),
        format,
        table,
    })
}

fn default_output_path(loaded: &Loaded, year: i32) -> TimetableResult<PathBuf> {
    let name = output_file_name(&loaded.path.to_string_lossy(), year)?;
    Ok(loaded.path.with_file_name(name))
}

fn write_expanded(
    loaded: &Loaded,
    year: i32,
    layout: &SourceLayout,
    out: &Path,
) -> TimetableResult<usize> {
    let output = expand_table(&loaded.table, year, layout)?;
    let bytes = loaded.format.write_table(&output)?;
    fs::write(out, bytes)?;
    Ok(output.height())
}

fn run_batch(paths: &[&str], year: i32, layout: &SourceLayout) -> TimetableResult<Vec<u8>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let path = Path::new(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        uploads.push(Upload::new(file_name, fs::read(path)?));
    }
    process_batch(&uploads, year, layout)
}

fn main() {
    logging::init(0);

    let mut year = Local::now().year();
    let mut layout = SourceLayout::default();
    let mut loaded: Option<Loaded> = None;

    println!("Timetable Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "year" => match parts.next() {
                Some(value) => match parse_year(value) {
                    Ok(parsed) => {
                        year = parsed;
                        println!("Year set to {year}.");
                    }
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Year: {year}"),
            },
            "layout" => {
                let sub = parts.next();
                let arg = parts.next();
                match (sub, arg) {
                    (Some("show"), _) => print_layout(&layout),
                    (Some("default"), _) => {
                        layout = SourceLayout::default();
                        println!("Layout reset to default.");
                    }
                    (Some("english"), _) => {
                        layout = SourceLayout::english();
                        println!("Layout set to english.");
                    }
                    (Some("set"), Some(path)) => match SourceLayout::load_json(path) {
                        Ok(value) => {
                            layout = value;
                            println!("Layout loaded from {path}.");
                        }
                        Err(e) => println!("Error loading layout: {e}"),
                    },
                    (Some("save"), Some(path)) => match layout.save_json(path) {
                        Ok(()) => println!("Layout saved to {path}."),
                        Err(e) => println!("Error saving layout: {e}"),
                    },
                    _ => println!("Usage: layout <show|default|english|set <json>|save <json>>"),
                }
                if loaded.is_some() && matches!(sub, Some("default" | "english" | "set")) {
                    println!("Reload the timetable to apply the new layout.");
                }
            }
            "load" => match parts.next() {
                Some(path) => match load(Path::new(path), &layout) {
                    Ok(value) => {
                        println!(
                            "Loaded line {} month {} ({} rows, {} hour columns) from {}.",
                            value.table.line_id(),
                            value.table.month(),
                            value.table.rows().len(),
                            value.table.declared_width(),
                            path
                        );
                        loaded = Some(value);
                    }
                    Err(e) => println!("Error loading timetable: {e}"),
                },
                None => println!("Usage: load <path>"),
            },
            "show" => match &loaded {
                Some(value) => match expand_table(&value.table, year, &layout) {
                    Ok(output) => match output.to_dataframe() {
                        Ok(df) => println!("{}", render_df_as_text_table(&df)),
                        Err(e) => println!("Error: {e}"),
                    },
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("No timetable loaded."),
            },
            "expand" => match &loaded {
                Some(value) => {
                    let out = match parts.next() {
                        Some(path) => Ok(PathBuf::from(path)),
                        None => default_output_path(value, year),
                    };
                    match out.and_then(|out| {
                        write_expanded(value, year, &layout, &out).map(|rows| (rows, out))
                    }) {
                        Ok((rows, out)) => {
                            println!("Wrote {rows} rows to {}.", out.display())
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
                None => println!("No timetable loaded."),
            },
            "batch" => {
                let zip_path = parts.next();
                let inputs: Vec<&str> = parts.collect();
                match zip_path {
                    Some(zip_path) if !inputs.is_empty() => {
                        match run_batch(&inputs, year, &layout)
                            .and_then(|bytes| fs::write(zip_path, bytes).map_err(Into::into))
                        {
                            Ok(()) => println!(
                                "Archived {} file(s) to {zip_path}.",
                                inputs.len()
                            ),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: batch <zip_path> <in1> [in2 ...]"),
                }
            }
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
