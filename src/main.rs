use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use object_editor::host::{self, BindingTarget, BoundValue, PLUGIN_ID, ViewProps};
use object_editor::logging::targets;
use object_editor::terminal::{KeyCode, Terminal, TerminalEvent};
use object_editor::ui::span::Span;
use object_editor::ui::style::{Color, Style};
use object_editor::widgets::traits::{DrawOutput, Drawable, Interactive, RenderContext};
use object_editor::{ObjectEditorController, Value};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "↑/↓ move  ←/→ fold  enter toggle/edit  enter/esc commit  q quit";

#[derive(Parser)]
#[command(name = "object-editor")]
#[command(about = "Browse and edit a JSON or YAML document as a collapsible tree")]
struct Cli {
    /// Document to edit
    file: PathBuf,

    /// Document format (inferred from the extension when omitted)
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Write the edited document here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append editor logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Open the nodes down to this path on start (repeatable)
    #[arg(long, value_name = "PATH")]
    expand: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn infer(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Editor(#[from] object_editor::Error),
    #[error("{0} is not an object or array")]
    Rejected(PathBuf),
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_file.as_deref())?;
    let format = cli.format.unwrap_or_else(|| Format::infer(&cli.file));
    let value = load_document(&cli.file, format)?;

    let bound = BoundValue::new(value);
    let mut controller = host::create_controller(bound.clone(), ViewProps::new());
    controller.view_mut().on_change(|event| {
        info!(target: targets::HOST, path = %event.prop_path, "field edited");
    });
    controller.view_mut().tick()?;
    for path in &cli.expand {
        controller.view_mut().expand(path)?;
    }

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut controller);
    terminal.leave()?;
    controller.dispose();
    result?;

    write_document(&bound.read(), format, cli.output.as_deref())
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("object_editor=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_document(path: &Path, format: Format) -> Result<Value, CliError> {
    let text = fs::read_to_string(path)?;
    let value: Value = match format {
        Format::Json => serde_json::from_str(&text)?,
        Format::Yaml => serde_yaml::from_str(&text)?,
    };
    let accepted = host::accept(&value, &json!({ "view": PLUGIN_ID }))
        .ok_or_else(|| CliError::Rejected(path.to_path_buf()))?;
    Ok(host::read_value(accepted.initial_value))
}

fn write_document(value: &Value, format: Format, output: Option<&Path>) -> Result<(), CliError> {
    let text = match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    };
    match output {
        Some(path) => fs::write(path, text)?,
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}

fn event_loop(terminal: &mut Terminal, controller: &mut ObjectEditorController) -> io::Result<()> {
    let mut status: Option<String> = None;
    let mut render_requested = true;

    loop {
        if terminal.poll(Duration::from_millis(100))? {
            match terminal.read_event()? {
                TerminalEvent::Key(key) => {
                    let editing = controller.view().active_edit().is_some();
                    if key.is_ctrl_char('c') || (!editing && key.code == KeyCode::Char('q')) {
                        break;
                    }
                    match controller.view_mut().on_key(key) {
                        Ok(result) => {
                            if let Some(change) = result.changes.last() {
                                status = Some(format!("updated {}", change.prop_path));
                            } else if result.handled {
                                status = None;
                            }
                        }
                        Err(err) => status = Some(err.to_string()),
                    }
                    render_requested = true;
                }
                TerminalEvent::Resize { .. } => {
                    render_requested = true;
                }
            }
        }

        match controller.view_mut().on_tick() {
            Ok(result) => render_requested |= result.request_render,
            Err(err) => {
                status = Some(err.to_string());
                render_requested = true;
            }
        }

        if render_requested {
            render(terminal, controller, status.as_deref())?;
            render_requested = false;
        }
    }

    Ok(())
}

fn render(terminal: &mut Terminal, controller: &ObjectEditorController, status: Option<&str>) -> io::Result<()> {
    let ctx = RenderContext {
        terminal_size: terminal.size(),
    };
    let mut out = controller.view().draw(&ctx);
    // Keep the footer on screen; the cursor row counts from the top.
    let body = (ctx.terminal_size.height as usize).saturating_sub(3);
    out.lines.truncate(body.max(1));
    out.lines.push(Vec::new());
    match status {
        Some(message) => out
            .lines
            .push(vec![Span::styled(message, Style::new().color(Color::Yellow))]),
        None => out
            .lines
            .extend(DrawOutput::plain_lines(vec![HELP.to_string()]).lines),
    }
    let cursor = out
        .cursor
        .filter(|pos| (pos.row as usize) < out.lines.len().saturating_sub(2));
    terminal.render_lines(&out.lines, cursor)
}
