mod shell;

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use fanyi_desk::clipboard;
use fanyi_desk::config::Settings;
use fanyi_desk::worker::{self, TranslationJob, TranslationOutcome};
use fanyi_desk::{CredentialStore, Credentials, HistoryLog, Lang, Session, TranslationClient};
use shell::Command;

fn setup_logging(log_dir: &Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = std::fs::create_dir_all(log_dir);

    // stdout belongs to the translations; only problems go to stderr
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::WARN);

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("debug")
        .filename_suffix("log")
        .build(log_dir)
        .ok();
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() {
    // settings first, so the log file follows data_dir
    let loaded = Settings::load();
    let log_dir = match &loaded {
        Ok(settings) => settings.log_dir(),
        Err(_) => Settings::app_dir(),
    };
    let _log_guard = setup_logging(&log_dir);

    std::panic::set_hook(Box::new(|info| {
        let msg = format!("{}", info);
        tracing::error!("PANIC: {}", msg);
        eprintln!("fanyi-desk crashed: {}", msg);
    }));

    tracing::info!("fanyi-desk starting, logging to {}", log_dir.display());

    let settings = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}, using defaults", e);
        Settings::default()
    });

    if let Err(e) = run(settings) {
        tracing::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }

    tracing::info!("fanyi-desk exiting");
}

fn run(settings: Settings) -> Result<()> {
    let data_dir = settings.data_dir();
    let store = CredentialStore::in_dir(&data_dir);
    let credentials = store.load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load credentials: {}", e);
        Credentials::default()
    });

    let history = Arc::new(HistoryLog::in_dir(&data_dir));
    let client = TranslationClient::new(settings.endpoint.clone(), settings.timeout())?;
    tracing::info!("Using endpoint {} (timeout {:?})", settings.endpoint, settings.timeout());
    let session = Session::new(client, history.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return translate_once(&session, &args.join(" "), &settings, &credentials);
    }

    let (job_tx, job_rx) = mpsc::channel::<TranslationJob>();
    let (result_tx, result_rx) = mpsc::channel::<TranslationOutcome>();
    let _worker = worker::spawn_translation_thread(job_rx, result_tx, session)?;

    let mut window = Window {
        from: settings.from_lang,
        to: settings.to_lang,
        credentials,
        store,
        history,
        job_tx,
        displayed: None,
        pending: 0,
    };
    window.run(result_rx)
}

fn translate_once(session: &Session, text: &str, settings: &Settings, credentials: &Credentials) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let translated = rt.block_on(session.translate(text, settings.from_lang, settings.to_lang, credentials))?;
    println!("{}", translated);
    Ok(())
}

struct Window {
    from: Lang,
    to: Lang,
    credentials: Credentials,
    store: CredentialStore,
    history: Arc<HistoryLog>,
    job_tx: mpsc::Sender<TranslationJob>,
    displayed: Option<String>,
    pending: usize,
}

impl Window {
    fn run(&mut self, result_rx: mpsc::Receiver<TranslationOutcome>) -> Result<()> {
        // stdin reader thread, so results can be shown while waiting for input
        let (line_tx, line_rx) = mpsc::channel::<String>();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(l) => {
                        if line_tx.send(l).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("stdin read failed: {}", e);
                        break;
                    }
                }
            }
        });

        if !self.credentials.is_complete() {
            notify("API credentials are not set, use :config <app_id> <secret_key>");
        }
        println!("Type :help for commands.");
        self.prompt();

        let mut input_closed = false;
        loop {
            loop {
                match line_rx.try_recv() {
                    Ok(line) => {
                        if !self.handle(shell::parse(&line)) {
                            return Ok(());
                        }
                        self.prompt();
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        input_closed = true;
                        break;
                    }
                }
            }

            while let Ok(outcome) = result_rx.try_recv() {
                self.pending = self.pending.saturating_sub(1);
                self.render(outcome);
                self.prompt();
            }

            if input_closed && self.pending == 0 {
                return Ok(());
            }

            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Returns false when the window should close.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Empty => {}
            Command::Translate(text) => self.submit(text),
            Command::From(code) => match code.parse::<Lang>() {
                Ok(lang) => {
                    self.from = lang;
                    tracing::info!("Source language changed to: {}", lang);
                }
                Err(e) => notify(&e.to_string()),
            },
            Command::To(code) => match code.parse::<Lang>() {
                Ok(lang) if lang.is_valid_target() => {
                    self.to = lang;
                    tracing::info!("Target language changed to: {}", lang);
                }
                Ok(lang) => notify(&fanyi_desk::Error::InvalidTargetLanguage(lang.code().into()).to_string()),
                Err(e) => notify(&e.to_string()),
            },
            Command::Langs => {
                for lang in Lang::ALL {
                    println!("  {:<6} {}", lang.code(), lang.display_name());
                }
            }
            Command::Config { app_id, secret_key } => {
                match self.store.save(&Credentials::new(app_id, secret_key)) {
                    Ok(saved) => {
                        self.credentials = saved;
                        println!("API credentials saved");
                    }
                    Err(e) => notify(&e.to_string()),
                }
            }
            Command::Copy => match self.displayed.as_deref() {
                Some(text) if !text.is_empty() => match clipboard::copy_text(text) {
                    Ok(()) => println!("Result copied to clipboard"),
                    Err(e) => {
                        tracing::warn!("{:#}", e);
                        notify(&format!("{:#}", e));
                    }
                },
                _ => notify("nothing to copy"),
            },
            Command::Paste => match clipboard::read_text() {
                Some(text) => self.submit(text),
                None => notify("clipboard has no text"),
            },
            Command::History(n) => {
                let entries = self.history.recent(n);
                if entries.is_empty() {
                    println!("No history yet");
                }
                for e in entries {
                    println!("[{}] {} -> {}", e.timestamp, e.from_lang, e.to_lang);
                    println!("  {}", e.query.replace('\n', "\n  "));
                    println!("  = {}", e.result.replace('\n', "\n    "));
                }
            }
            Command::Help => println!("{}", shell::HELP),
            Command::Quit => return false,
            Command::Invalid(msg) => notify(&msg),
        }
        true
    }

    fn submit(&mut self, text: String) {
        if let Err(e) = self.credentials.ensure_complete() {
            notify(&e.to_string());
            return;
        }
        let preview: String = text.chars().take(50).collect();
        tracing::info!("Submitting \"{}\"", preview);
        let job = TranslationJob {
            text,
            from: self.from,
            to: self.to,
            credentials: self.credentials.clone(),
        };
        if self.job_tx.send(job).is_err() {
            notify("translation worker is not running");
            return;
        }
        self.pending += 1;
        println!("Translating...");
    }

    fn render(&mut self, outcome: TranslationOutcome) {
        match outcome.result {
            Ok(translated) => {
                let orig_preview: String = outcome.original.chars().take(40).collect();
                let trans_preview: String = translated.chars().take(40).collect();
                tracing::info!("\"{}\" -> \"{}\"", orig_preview, trans_preview);
                println!("{}", translated);
                self.displayed = Some(translated);
            }
            Err(e) => notify(&e.to_string()),
        }
    }

    fn prompt(&self) {
        print!("{} -> {}> ", self.from, self.to);
        let _ = std::io::stdout().flush();
    }
}

fn notify(msg: &str) {
    eprintln!("! {}", msg);
}
