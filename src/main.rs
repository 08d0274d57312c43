use anyhow::{Context, Result};
use callpulse::kernel::config::EngineConfig;
use callpulse::session::console::parse_line;
use callpulse::session::driver::{run_session, SourceEvent};
use callpulse::session::export::format_summary;
use callpulse::session::{CallSession, SessionUpdate};
use chrono::Utc;
use std::path::PathBuf;
use std::io::BufRead;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

struct Args {
    config: Option<PathBuf>,
    transcript: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { config: None, transcript: None };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            _ => args.transcript = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn print_update(update: &SessionUpdate) {
    if let Some(summary) = &update.summary {
        println!();
        print!("{}", format_summary(summary));
        println!();
        return;
    }
    if let Some(partial) = &update.partial {
        println!("  ... {}", partial);
        return;
    }
    println!("[{} entries | readiness {}%]", update.entries, update.readiness);
    for signal in &update.signals {
        println!("  {:<24} {:>3}%", signal.label, signal.intensity);
    }
    if let Some(rec) = &update.recommendation {
        println!("  -> {} ({}%)", rec.service.display_name(), rec.confidence);
    }
    for rec in &update.recommendations {
        println!("  -> {} ({}%)", rec.service.display_name(), rec.confidence);
    }
}

async fn pump_lines<R>(reader: R, tx: mpsc::Sender<SourceEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(event) = parse_line(&line) {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

// Interactive stdin gets its own thread so a pending read never holds up shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<SourceEvent>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            };
            if let Some(event) = parse_line(&line) {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    tracing::info!(mode = ?config.mode, "Starting call console");

    // 2. Session + Channels
    let (source_tx, source_rx) = mpsc::channel(100);
    let (update_tx, mut update_rx) = mpsc::channel::<SessionUpdate>(100);
    let cancel = CancellationToken::new();

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, ending call");
            interrupt.cancel();
        }
    });

    let mut session = CallSession::new(config);
    session.start_call(Utc::now());
    let driver = tokio::spawn(run_session(session, source_rx, update_tx, cancel));

    let printer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            print_update(&update);
        }
    });

    // 3. Input: transcript file or console
    match &args.transcript {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open transcript {}", path.display()))?;
            tokio::spawn(pump_lines(BufReader::new(file), source_tx));
        }
        None => spawn_stdin_reader(source_tx),
    }

    // 4. Drain and export
    let mut session = driver.await?;
    printer.await?;
    session.end_call(Utc::now());
    println!();
    print!("{}", format_summary(&session.summary(Utc::now())));

    Ok(())
}
