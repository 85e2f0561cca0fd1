//! Interactive UNILINK chat node.
//!
//! Opens one transport link for `--self-id` and reads commands from
//! stdin: `help`, `whoami`, `peers`, `send <id> <text>`, `quit`.
//! Received payloads print as they arrive. Set `RUST_LOG` to control log
//! verbosity.

mod i18n;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use unilink::prelude::*;

use crate::i18n::Catalog;

/// Identifier-addressed UDP chat node.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Node id to run as (must be present in the config).
    #[arg(long)]
    self_id: i16,

    /// Path to the address table config file.
    #[arg(long, default_value = "peers.conf")]
    config: PathBuf,

    /// Message catalog language (`en` or `pt`).
    #[arg(long, default_value = "en")]
    lang: String,
}

/// Prints inbound payloads and forwards sends to the bound transport.
struct ChatUser {
    service: ServiceUser,
    /// Pre-resolved `recv` template, so the receive path needs no catalog.
    recv_line: String,
}

impl DataIndication for ChatUser {
    fn on_data_indication(&self, origin: NodeId, payload: String) {
        println!(
            "\n{}",
            i18n::apply(&self.recv_line, &[&origin.to_string(), &payload])
        );
        prompt();
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::for_language(&cli.lang);
    let config_label = cli.config.display().to_string();

    let table = AddressTable::load(&cli.config)
        .await
        .with_context(|| catalog.format("start-failed", &[&config_label]))?;

    let Some(endpoint) = table.lookup(cli.self_id) else {
        anyhow::bail!(
            "{}",
            catalog.format("self-missing", &[&cli.self_id.to_string()])
        );
    };

    // Two-phase wiring: callback holder first, then the transport, then
    // bind the transport back into the holder.
    let user = Arc::new(ChatUser {
        service: ServiceUser::new(cli.self_id),
        recv_line: catalog.get("recv"),
    });

    let worker = Worker::new("chat", cli.self_id, &endpoint.ip().to_string(), endpoint.port())?;
    let sink: Arc<dyn DataIndication> = user.clone();
    let link = Arc::new(
        worker
            .open(table, sink)
            .await
            .with_context(|| catalog.format("start-failed", &[&config_label]))?,
    );
    user.service.bind(Arc::clone(&link));

    println!(
        "{}",
        catalog.format("started", &[&cli.self_id.to_string(), &config_label])
    );
    println!("{}", catalog.get("help"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(line.trim(), &catalog, &user, &link).await {
                    break;
                }
                prompt();
            }
        }
    }

    println!("{}", catalog.get("shutting-down"));
    link.close();
    println!("{}", catalog.get("goodbye"));
    Ok(())
}

/// Execute one REPL command. Returns `false` when the loop should exit.
async fn handle_command(
    line: &str,
    catalog: &Catalog,
    user: &ChatUser,
    link: &UnilinkTransport,
) -> bool {
    if line.is_empty() {
        return true;
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return false,
        "help" => println!("{}", catalog.get("help")),
        "whoami" => println!(
            "{}",
            catalog.format("whoami", &[&user.service.self_id().to_string()])
        ),
        "peers" => {
            println!("{}", catalog.get("peers-header"));
            let mut peers: Vec<_> = link.table().iter().collect();
            peers.sort_by_key(|(id, _)| *id);
            for (id, addr) in peers {
                println!("  {id} -> {addr}");
            }
        }
        "send" => send_command(rest, catalog, user).await,
        _ => {
            println!("{}", catalog.get("unknown-command"));
            println!("{}", catalog.get("help"));
        }
    }
    true
}

/// Parse and run one `send <id> <text>` command.
async fn send_command(rest: &str, catalog: &Catalog, user: &ChatUser) {
    let Some((id, message)) = rest.split_once(' ') else {
        println!("{}", catalog.get("send-usage"));
        return;
    };

    let Ok(dest) = id.trim().parse::<NodeId>() else {
        println!("{}", catalog.format("dest-invalid", &[id.trim()]));
        return;
    };

    match user.service.send(dest, message).await {
        Ok(()) => println!(
            "{}",
            catalog.format("send-confirm", &[&dest.to_string(), message])
        ),
        Err(err) => println!("{}", catalog.format("send-failed", &[&err.to_string()])),
    }
}
