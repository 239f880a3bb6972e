//! Filterman CLI - terminal editor for area filters

mod cli;
mod config;
mod io;
mod logging;
mod ui;

use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{debug, info};

use filterman_core::{spec, App, Format, InputTarget, Mode};

use crate::cli::{ClipboardField, Cli, Command};
use crate::config::Settings;
use crate::logging::{init_logging, LogConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::data_dir()?;
    let settings = Settings::load(&data_dir)?;

    let command = cli.command.unwrap_or(Command::Edit { file: None });

    // The editor owns the terminal, so its logs go to a file
    let log_file = match (&cli.log_file, &command) {
        (Some(path), _) => Some(path.clone()),
        (None, Command::Edit { .. }) => Some(data_dir.join(config::LOG_FILE)),
        (None, _) => None,
    };
    let log_config = LogConfig::from_verbosity(cli.verbose, settings.level()?)
        .with_format(cli.log_format.into())
        .with_log_file(log_file);
    init_logging(&log_config).context("Failed to initialize logging")?;

    let declared = cli.format.map(Format::from);
    debug!(?declared, default_format = settings.default_format.as_str(), "starting");

    match command {
        Command::Edit { file } => run_editor(file, declared, &settings),
        Command::Expand { spec } => {
            for area in spec::parse(&spec) {
                println!("{}", area);
            }
            Ok(())
        }
        Command::Export {
            file,
            clipboard,
            json,
        } => run_export(&file, resolve_format(&file, declared, &settings), clipboard, json),
        Command::Convert { input, output, to } => {
            let in_format = resolve_format(&input, declared, &settings);
            let out_format = to
                .map(Format::from)
                .or_else(|| Format::from_path(&output))
                .unwrap_or(settings.default_format);
            let mut store = io::load_store(&input, in_format)?;
            io::save_store(&mut store, &output, out_format)?;
            info!(
                input = %input.display(),
                output = %output.display(),
                "converted {} -> {}",
                in_format.as_str(),
                out_format.as_str()
            );
            Ok(())
        }
    }
}

fn resolve_format(path: &Path, declared: Option<Format>, settings: &Settings) -> Format {
    declared
        .or_else(|| Format::from_path(path))
        .unwrap_or(settings.default_format)
}

fn run_export(
    path: &Path,
    format: Format,
    clipboard: Option<ClipboardField>,
    json: bool,
) -> Result<()> {
    let store = io::load_store(path, format)?;
    let flat = filterman_core::flatten(&store);

    if json {
        println!("{}", filterman_core::to_json(&flat).context("Failed to serialize export")?);
        return Ok(());
    }

    match clipboard {
        Some(ClipboardField::Areas) => io::copy_to_clipboard(&flat.areas_joined()),
        Some(ClipboardField::SubAreas) => io::copy_to_clipboard(&flat.sub_areas_joined()),
        None => {
            println!("{}", flat.areas_joined());
            println!("{}", flat.sub_areas_joined());
            Ok(())
        }
    }
}

fn run_editor(file: Option<PathBuf>, declared: Option<Format>, settings: &Settings) -> Result<()> {
    let mut app = App::new();
    app.declared_format = declared;
    app.default_format = settings.default_format;

    // Load file if provided; a path that does not exist yet becomes the save target
    if let Some(path) = file {
        if path.exists() {
            match io::open_in_app(&mut app, &path) {
                Ok(()) => app.set_status(&format!("Loaded {}", path.display())),
                Err(e) => app.set_status(&format!("Error: {:#}", e)),
            }
        } else {
            app.set_status(&format!("New file {}", path.display()));
            app.file_path = Some(path);
        }
    } else {
        app.set_status("Press 'a' to add areas, '?' for help");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Clear status on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, key.code),
                Mode::Input => handle_input_mode(app, key.code),
                Mode::ConfirmLoad => handle_confirm_mode(app, key.code),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') => app.select_top(),
        KeyCode::Char('G') => app.select_bottom(),

        // Editing
        KeyCode::Char('a') => app.start_input(InputTarget::AreaSpec),
        KeyCode::Char('s') => app.add_sub_area_to_selected(),
        KeyCode::Char('i') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') => {
            app.delete_selected();
        }

        // File
        KeyCode::Char('w') => app.save(),
        KeyCode::Char('o') => app.start_input(InputTarget::LoadPath),

        // Export
        KeyCode::Char('y') => copy_export(app, ClipboardField::Areas),
        KeyCode::Char('Y') => copy_export(app, ClipboardField::SubAreas),

        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => app.input_buffer.push(c),
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_load(true),
        KeyCode::Char('n') | KeyCode::Esc => app.confirm_load(false),
        _ => {}
    }
}

fn copy_export(app: &mut App, field: ClipboardField) {
    let flat = app.request_export();
    let (text, what) = match field {
        ClipboardField::Areas => (flat.areas_joined(), "areas"),
        ClipboardField::SubAreas => (flat.sub_areas_joined(), "sub-areas"),
    };

    match io::copy_to_clipboard(&text) {
        Ok(()) => app.set_status(&format!("Copied {} {} to clipboard", flat.len(), what)),
        Err(e) => app.set_status(&format!("Copy failed: {:#}", e)),
    }
}
