use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod clipboard;
mod collection;
mod config;
mod editor;
mod engine;
mod error;
mod help;
mod input;
mod notification;
mod picker;
mod results;
mod scroll;
#[cfg(test)]
mod test_utils;
mod theme;
mod widget;
mod widgets;

use app::{App, OutputMode};
use config::QueryConfig;
use engine::LdfEngine;
use widget::{QueryCollectionSource, QueryController, WidgetOptions, WidgetSettings};

/// How the results pane is printed after Ctrl+O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// Interactive Linked Data Fragments query tool
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Interactive Linked Data Fragments query tool with streaming results"
)]
struct Args {
    /// Start fragment URL to query (repeat for several sources)
    #[arg(long = "start-fragment", value_name = "URL")]
    start_fragments: Vec<String>,

    /// SPARQL query to load into the editor
    #[arg(long, conflicts_with = "query_file")]
    query: Option<String>,

    /// File holding the SPARQL query to load into the editor
    #[arg(long, value_name = "PATH")]
    query_file: Option<PathBuf>,

    /// Query collection document (URL or local path)
    #[arg(long, value_name = "URL|PATH")]
    collection: Option<String>,

    /// Output format for results printed on exit
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    // Writes to /tmp/ldfq-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/ldfq-debug.log")
            .expect("Failed to open /tmp/ldfq-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== LDFQ DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();

    let args = Args::parse();

    let query_text = match &args.query_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read query file {}", path.display()))?,
        ),
        None => args.query.clone(),
    };
    let options = widget_options(config_result.config.query.clone(), &args, query_text);

    let settings = WidgetSettings {
        prefixes: config_result.config.prefixes.clone(),
        fetch_timeout: Duration::from_secs(config_result.config.http.timeout_secs),
    };
    let engine = LdfEngine::new(config_result.config.http.clone());
    let abort_handle = engine.abort_handle();
    let controller = QueryController::new(engine, options, Some(abort_handle), settings);

    let terminal = init_terminal()?;

    let app = App::new(controller, &config_result.config);
    let result = run(terminal, app, config_result.warning);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    handle_output(&app, args.format);

    #[cfg(debug_assertions)]
    log::debug!("=== LDFQ DEBUG SESSION ENDED ===");

    Ok(())
}

/// Config defaults with command-line arguments on top
fn widget_options(config: QueryConfig, args: &Args, query: Option<String>) -> WidgetOptions {
    let start_fragment = if args.start_fragments.is_empty() {
        config.start_fragment
    } else {
        Some(args.start_fragments.join(" "))
    };

    WidgetOptions {
        start_fragment,
        start_fragments: config.start_fragments,
        query: query.or(config.query),
        queries: config.queries,
        query_collection: args
            .collection
            .clone()
            .or(config.collection)
            .map(QueryCollectionSource::Location),
    }
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, warning: Option<String>) -> Result<App> {
    if let Some(warning) = warning {
        app.notification.show_warning(&warning);
    }

    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    // Nothing keeps running once the UI is gone
    app.controller.stop_execution(None);
    Ok(app)
}

/// Handle output after terminal is restored
fn handle_output(app: &App, format: OutputFormat) {
    match app.output_mode() {
        Some(OutputMode::Results) => {
            let results = app.controller.results();
            match format {
                OutputFormat::Text => println!("{}", results.text()),
                OutputFormat::Html => println!("{}", results.to_html()),
            }
        }
        Some(OutputMode::Query) => {
            println!("{}", app.query());
        }
        None => {
            // No output mode (exited with Ctrl+C or q)
        }
    }
}
