//! Quill entrypoint.
//!
//! Startup order matters: logging and configuration first, then the file is
//! loaded while the terminal is still in cooked mode (so a load failure is a
//! plain stderr message and exit code 1), and only then is the alternate
//! screen entered. The event loop is synchronous: one blocking read, one
//! dispatch, at most one frame.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{DispatchResult, dispatch, load_session};
use core_config::{Config, load_from};
use core_render::RenderEngine;
use core_state::EditorSession;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use core_text::ColumnMapper;
use std::fmt;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "quill.log";
const FALLBACK_TERMINAL_SIZE: (u16, u16) = (80, 24);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill terminal text editor")]
struct Args {
    /// File to edit.
    pub path: PathBuf,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

#[derive(Debug, Clone)]
struct StartupTelemetry {
    path: PathBuf,
    lines: usize,
    bytes: usize,
    config_source: Option<PathBuf>,
    tab_stop: usize,
    terminal: (u16, u16),
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = std::env::temp_dir();
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                core_terminal::restore();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    /// Load configuration and the document. Nothing here touches the terminal
    /// mode, so failures are reported on the normal screen.
    fn bootstrap(&self, args: &Args) -> Result<(EditorSession, Config, StartupTelemetry)> {
        let config = load_from(args.config.clone())?;
        let terminal = self.backend.size().unwrap_or_else(|e| {
            warn!(target: "runtime.startup", error = %e, "terminal_size_unavailable");
            FALLBACK_TERMINAL_SIZE
        });
        let ctx = config.context(terminal.0, terminal.1);
        let mut session = EditorSession::new(
            ColumnMapper::new(config.effective_tab_stop),
            usize::from(ctx.text_columns()),
            usize::from(ctx.text_rows()),
        )
        .with_file_name(&args.path);
        load_session(&args.path, &mut session).inspect_err(|e| {
            error!(target: "io", error = %e, "file_open_error");
        })?;

        let telemetry = StartupTelemetry {
            path: args.path.clone(),
            lines: session.buffer().count(),
            bytes: session.buffer().byte_len(),
            config_source: config.source.clone(),
            tab_stop: config.effective_tab_stop,
            terminal,
        };
        Ok((session, config, telemetry))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    QuitKey,
    InputError,
    RenderError,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::QuitKey => "quit_key",
            ShutdownReason::InputError => "input_error",
            ShutdownReason::RenderError => "render_error",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

/// Which frame a dispatch result calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Full,
    CursorOnly,
    Skip,
}

fn frame_kind(result: DispatchResult, session: &EditorSession) -> FrameKind {
    if session.is_dirty() {
        FrameKind::Full
    } else if result.dirty {
        FrameKind::CursorOnly
    } else {
        FrameKind::Skip
    }
}

struct EditorRuntime {
    session: EditorSession,
    config: Config,
    engine: RenderEngine,
}

impl EditorRuntime {
    fn new(session: EditorSession, config: Config) -> Self {
        let engine = RenderEngine::new(config.file.status.enabled);
        Self {
            session,
            config,
            engine,
        }
    }

    fn render<W: Write>(&mut self, kind: FrameKind, out: &mut W) -> Result<()> {
        match kind {
            FrameKind::Full => {
                self.engine.render_full(&self.session, out)?;
                self.session.clear_dirty();
            }
            FrameKind::CursorOnly => self.engine.render_cursor_only(&self.session, out)?,
            FrameKind::Skip => {}
        }
        Ok(())
    }

    fn run(&mut self) -> Result<ShutdownReason> {
        let mut out = stdout();
        if let Err(e) = self.render(FrameKind::Full, &mut out) {
            log_shutdown_stage(ShutdownReason::RenderError, "initial_frame");
            return Err(e);
        }
        loop {
            let event = match core_input::read_event() {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    log_shutdown_stage(ShutdownReason::InputError, "read_event");
                    return Err(e);
                }
            };
            let result = dispatch(event, &mut self.session, &self.config);
            if result.quit {
                return Ok(ShutdownReason::QuitKey);
            }
            let kind = frame_kind(result, &self.session);
            if let Err(e) = self.render(kind, &mut out) {
                log_shutdown_stage(ShutdownReason::RenderError, "frame");
                return Err(e);
            }
        }
    }
}

fn run(startup: &mut AppStartup) -> Result<()> {
    let args = Args::parse();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let (session, config, telemetry) = startup
        .bootstrap(&args)
        .with_context(|| format!("cannot open {}", args.path.display()))?;
    info!(
        target: "runtime.startup",
        path = %telemetry.path.display(),
        lines = telemetry.lines,
        bytes = telemetry.bytes,
        config = ?telemetry.config_source,
        tab_stop = telemetry.tab_stop,
        columns = telemetry.terminal.0,
        rows = telemetry.terminal.1,
        "bootstrap_complete"
    );

    startup.backend.set_title("quill")?;
    let guard = TerminalGuard::enter(&mut startup.backend)?;
    let mut runtime = EditorRuntime::new(session, config);
    let reason = runtime.run()?;
    log_shutdown_stage(reason, "loop_exit");
    drop(guard);

    let stats = runtime.engine.stats();
    info!(
        target: "runtime.shutdown",
        reason = %reason,
        modified = runtime.session.is_modified(),
        full_frames = stats.full_frames,
        cursor_only_frames = stats.cursor_only_frames,
        "terminal_restored"
    );
    Ok(())
}

fn main() -> ExitCode {
    let mut startup = AppStartup::new();
    match run(&mut startup) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "runtime", error = %format!("{e:#}"), "fatal");
            eprintln!("quill: {e:#}");
            ExitCode::FAILURE
        }
    }
}
