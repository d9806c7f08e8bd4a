use stepgate::adapters::ReqwestHttpClient;
use stepgate::app::{fetch_health, App, AppMessage};
use stepgate::config::{ClientConfig, Command, USAGE};
use stepgate::error::{Categorized, ErrorCategory};
use stepgate::logging::init_tracing;
use stepgate::terminal::{setup_panic_hook, TerminalManager};
use stepgate::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match ClientConfig::from_env_and_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}: {}\n\n{}", e.category().description(), e, USAGE);
            std::process::exit(2);
        }
    };

    match command {
        Command::Version => {
            println!("stepgate {}", VERSION);
            Ok(())
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Health(config) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_health_check(config))
        }
        Command::Run(config) => {
            init_tracing(config.log_file_path().as_deref());
            info!("stepgate {} starting, server {}", VERSION, config.server);

            setup_panic_hook();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_tui(config))
        }
    }
}

/// `--health`: print the server's health and exit non-zero if unreachable.
async fn run_health_check(config: ClientConfig) -> Result<()> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    match fetch_health(&http, &config.health_url()).await {
        Ok(health) => {
            println!("{}", health.summary());
            Ok(())
        }
        Err(e) => Err(eyre!("Health check failed for {}: {}", config.health_url(), e)),
    }
}

async fn run_tui(config: ClientConfig) -> Result<()> {
    let mut app = App::new(config)?;
    let mut term_manager = TerminalManager::new().map_err(|e| {
        error!(category = %ErrorCategory::Terminal, "Terminal setup failed: {}", e);
        e.wrap_err(ErrorCategory::Terminal.description())
    })?;
    if !term_manager.keyboard_enhanced() {
        app.log
            .info("Terminal has no keyboard enhancement support, use Ctrl+S to run a task");
    }

    app.start();
    let result = run_app(term_manager.terminal(), &mut app).await;

    term_manager.restore();
    info!("stepgate exiting");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    // The loop owns the receiver so it can be polled in select!
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => app.handle_key_event(key),
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse_event(mouse),
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => warn!("Terminal event error: {}", e),
                    None => {
                        return Err(eyre!("Terminal event stream ended"));
                    }
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
