use std::{env, io, process};

use ledger_cmd::Engine;
use ledger_cmd::csv::{read_instructions, write_accounts};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: ledger-cmd <instructions.csv>");
        process::exit(2);
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let instructions = match read_instructions(path) {
        Ok(instructions) => instructions,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut engine = Engine::new();
    let (sender, receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in instructions {
            match result {
                Ok(instruction) => {
                    if sender.send(instruction).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    engine.run(ReceiverStream::new(receiver)).await;

    if let Err(e) = write_accounts(io::stdout().lock(), engine.ledger().accounts()) {
        error!("failed to write accounts: {e}");
        process::exit(1);
    }
}
