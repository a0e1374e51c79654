use acadexa_cli::{AcadexaCli, explain, load_store, render, run_command};
use acadexa_command::{Dispatcher, MemoryRecordStore, Principal};
use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = std::env::var("ACADEXA_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(
    cli: &AcadexaCli,
    dispatcher: &Dispatcher<MemoryRecordStore>,
    principal: &Principal,
    text: &str,
) -> Result<()> {
    let value = if cli.explain {
        explain(dispatcher, text)?
    } else {
        run_command(dispatcher, principal, text).await?
    };
    println!("{}", render(&value, cli.compact)?);
    Ok(())
}

#[tokio::main]
pub async fn main() -> Result<()> {
    init_logging();

    let cli = AcadexaCli::parse();
    let principal = cli.principal();
    let dispatcher = Dispatcher::new(load_store(cli.data.as_deref()).await?);

    if let Some(command) = cli.command() {
        return run(&cli, &dispatcher, &principal, &command).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            run(&cli, &dispatcher, &principal, line).await?;
        }
    }
    Ok(())
}
