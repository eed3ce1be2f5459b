use std::{
    io::{self, Write as _},
    sync::Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use client_core::{
    ApiTransport, ListController, ListPhase, ListSnapshot, MutationSubmitter, Navigator,
    RecordLookup, SessionGate,
};
use shared::domain::{Credentials, SortColumn, WireRecordDraft};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL. Falls back to PILLAR_SERVER_URL, then localhost.
    #[arg(long)]
    server_url: Option<String>,
}

struct ConsoleNavigator;

#[async_trait]
impl Navigator for ConsoleNavigator {
    async fn to_login(&self) {
        println!("-- session expired; log in again with: login <username> <password>");
    }

    async fn to_wire_list(&self) {
        println!("-- logged in");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
    let args = Args::parse();

    let server_url = args
        .server_url
        .or_else(|| std::env::var("PILLAR_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    info!(%server_url, "connecting to wire backend");
    let transport = ApiTransport::new(server_url)?;
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
    let gate = SessionGate::new(Arc::clone(&transport), Arc::clone(&navigator));
    let controller = ListController::new(Arc::clone(&transport), Arc::clone(&navigator));
    let submitter = MutationSubmitter::new(Arc::clone(&transport), Arc::clone(&controller));
    let lookup = RecordLookup::new(Arc::clone(&transport));

    let mut draft = WireRecordDraft::default();
    print_help();
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("login") => match (parts.next(), parts.next()) {
                (Some(username), Some(password)) => {
                    let credentials = Credentials {
                        username: username.to_string(),
                        password: password.to_string(),
                    };
                    match gate.submit(&credentials).await {
                        Ok(()) => {
                            controller.load().await;
                            render(&controller.snapshot().await);
                        }
                        Err(err) => println!("{err}"),
                    }
                }
                _ => println!("usage: login <username> <password>"),
            },
            Some("list") | Some("refresh") => {
                controller.refresh().await;
                render(&controller.snapshot().await);
            }
            Some("next") => {
                controller.next_page().await;
                render(&controller.snapshot().await);
            }
            Some("prev") => {
                controller.prev_page().await;
                render(&controller.snapshot().await);
            }
            Some("page") => match parts.next().and_then(|raw| raw.parse::<u32>().ok()) {
                Some(page) => {
                    controller.set_page(page).await;
                    render(&controller.snapshot().await);
                }
                None => println!("usage: page <number>"),
            },
            Some("sort") => match parts.next().and_then(SortColumn::parse) {
                Some(column) => {
                    controller.set_sort(column).await;
                    render(&controller.snapshot().await);
                }
                None => println!(
                    "usage: sort <seq|sender_rtn|sender_an|receiver_rtn|receiver_an|amount>"
                ),
            },
            Some("set") => match (parts.next(), parts.next()) {
                (Some(field), Some(value)) => set_draft_field(&mut draft, field, value),
                _ => println!("usage: set <field> <value>"),
            },
            Some("show") => show_draft(&draft),
            Some("submit") => match submitter.submit(&mut draft).await {
                Ok(()) => {
                    println!("wire message submitted");
                    render(&controller.snapshot().await);
                }
                Err(err) => println!("{err}"),
            },
            Some("get") => match parts.next().and_then(|raw| raw.parse::<i64>().ok()) {
                Some(seq) => match lookup.fetch(seq).await {
                    Ok(Some(record)) => println!(
                        "seq={} {} -> {} amount=${}",
                        record.seq, record.sender_rtn, record.receiver_rtn, record.amount
                    ),
                    Ok(None) => println!("no wire message with seq {seq}"),
                    Err(err) => println!("{err}"),
                },
                None => println!("usage: get <seq>"),
            },
            Some("help") => print_help(),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command: {other} (try: help)"),
            None => {}
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  login <username> <password>");
    println!("  list | refresh | next | prev | page <n>");
    println!("  sort <seq|sender_rtn|sender_an|receiver_rtn|receiver_an|amount>");
    println!("  set <seq|sender_rtn|sender_an|receiver_rtn|receiver_an|amount> <value>");
    println!("  show | submit | get <seq>");
    println!("  help | quit");
}

fn set_draft_field(draft: &mut WireRecordDraft, field: &str, value: &str) {
    let slot = match field {
        "seq" => &mut draft.seq,
        "sender_rtn" => &mut draft.sender_rtn,
        "sender_an" => &mut draft.sender_an,
        "receiver_rtn" => &mut draft.receiver_rtn,
        "receiver_an" => &mut draft.receiver_an,
        "amount" => &mut draft.amount,
        other => {
            println!("unknown field: {other}");
            return;
        }
    };
    *slot = value.to_string();
}

fn show_draft(draft: &WireRecordDraft) {
    println!(
        "draft: seq={} sender_rtn={} sender_an={} receiver_rtn={} receiver_an={} amount={}",
        draft.seq, draft.sender_rtn, draft.sender_an, draft.receiver_rtn, draft.receiver_an,
        draft.amount
    );
}

fn render(snapshot: &ListSnapshot) {
    if let Some(message) = snapshot.error_message() {
        println!("error: {message}");
    }
    match snapshot.phase {
        ListPhase::Idle | ListPhase::Loading => return,
        ListPhase::Unauthorized => return,
        ListPhase::Loaded | ListPhase::Failed => {}
    }
    if snapshot.records.is_empty() {
        println!("no wire messages");
    } else {
        println!(
            "{:<6} {:<11} {:<14} {:<11} {:<14} {:>12}",
            "SEQ", "SENDER RTN", "SENDER AN", "RECV RTN", "RECV AN", "AMOUNT"
        );
        for record in &snapshot.records {
            println!(
                "{:<6} {:<11} {:<14} {:<11} {:<14} {:>12}",
                record.seq,
                record.sender_rtn,
                record.sender_an,
                record.receiver_rtn,
                record.receiver_an,
                format!("${}", record.amount)
            );
        }
    }
    let more = if snapshot.has_more { " (more: next)" } else { "" };
    println!("page {} sorted by {}{more}", snapshot.page, snapshot.sort.as_str());
}
