//! slidetoe - play sliding-mark tic-tac-toe from the terminal.

use anyhow::Result;
use clap::Parser;
use slidetoe::{
    AppConfig, Cli, Command, Cooldown, InputCommand, JsonFileStore, MemoryStore, Reply, Session,
    SnapshotStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(path) = cli.snapshot {
        config = config.with_snapshot_path(path);
    }

    match cli.command {
        Command::Play {
            max_wins,
            no_persist,
        } => {
            if let Some(max_wins) = max_wins {
                config = config.with_max_wins_to_end_match(max_wins);
            }
            if no_persist {
                run_play(Session::open(MemoryStore::new(), config)).await
            } else {
                let store = JsonFileStore::new(config.snapshot_path().clone());
                run_play(Session::open(store, config)).await
            }
        }
        Command::Inspect => run_inspect(&config),
    }
}

/// Print the stored snapshot.
#[instrument(skip(config))]
fn run_inspect(config: &AppConfig) -> Result<()> {
    let store = JsonFileStore::new(config.snapshot_path().clone());
    match store.load()? {
        Some(snapshot) => println!("{}", snapshot.to_json()?),
        None => println!("No snapshot at {}", store.path().display()),
    }
    Ok(())
}

/// Read commands from stdin until `quit` or end of input.
///
/// While a cooldown runs only `status` and `quit` are taken; the cooldown's
/// closing action fires when its timer elapses.
#[instrument(skip(session))]
async fn run_play<S: SnapshotStore>(mut session: Session<S>) -> Result<()> {
    info!("Starting slidetoe");
    print_reply(&session.handle(InputCommand::Status));
    println!("Type 'resume' to play, 'quit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<(Cooldown, Instant)> = None;

    loop {
        let deadline = pending.map(|(_, at)| at).unwrap_or_else(Instant::now);

        tokio::select! {
            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some((cooldown, _)) = pending.take() {
                    debug!(%cooldown, "Cooldown elapsed");
                    let reply = session.finish_cooldown(cooldown);
                    print_reply(&reply);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                let command = match line.parse::<InputCommand>() {
                    Ok(command) => command,
                    Err(error) => {
                        println!("{}", error);
                        continue;
                    }
                };

                if pending.is_some()
                    && !matches!(command, InputCommand::Status | InputCommand::Quit)
                {
                    println!("Please wait for the next round.");
                    continue;
                }

                let reply = session.handle(command);
                print_reply(&reply);
                if reply.quit {
                    break;
                }
                if let Some(cooldown) = reply.cooldown {
                    pending = Some((cooldown, Instant::now() + session.cooldown_duration(cooldown)));
                }
            }
        }
    }

    info!("Session closed");
    Ok(())
}

fn print_reply(reply: &Reply) {
    for line in &reply.lines {
        println!("{}", line);
    }
}
