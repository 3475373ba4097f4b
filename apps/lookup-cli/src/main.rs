//! lookup-cli: drives the two-tier item lookup from the command line.
//!
//! Builds a primary and a secondary in-memory store (sample seeds, or JSON
//! files named by `PRIMARY_SEED_PATH` / `SECONDARY_SEED_PATH`), then runs the
//! requested operations through the fallback service. Every operation prints
//! one JSON line on stdout; logs go to stderr.
//!
//! Run:
//! ```bash
//! cargo run -p lookup-cli -- get 3
//! cargo run -p lookup-cli -- run get:1 delete:1 get:1
//! LOG_FORMAT=json RUST_LOG=debug cargo run -p lookup-cli -- delete 5
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.

mod config;

use std::fmt;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use domain::adapters::memory_repo::InMemoryItemRepo;
use domain::service::LookupService;
use domain::{Item, ItemId, ItemRepository, Tier};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt as tfmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "lookup-cli", version, about = "Primary/secondary item lookup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up an item, primary store first
    Get { id: ItemId },
    /// Delete an item from the first store that holds it
    Delete { id: ItemId },
    /// Run a sequence of operations such as `get:1 delete:1 get:1`
    Run {
        #[arg(required = true)]
        ops: Vec<Op>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum OpKind {
    Get,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Op {
    kind: OpKind,
    id: ItemId,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <get|delete>:<id>, got '{}'", s))?;
        let kind = match kind.to_lowercase().as_str() {
            "get" => OpKind::Get,
            "delete" => OpKind::Delete,
            other => return Err(format!("unknown operation '{}'", other)),
        };
        let id = id
            .parse()
            .map_err(|e| format!("invalid id '{}': {}", id, e))?;
        Ok(Op { kind, id })
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            OpKind::Get => "get",
            OpKind::Delete => "delete",
        };
        write!(f, "{}:{}", kind, self.id)
    }
}

/// One line of output per executed operation.
#[derive(Debug, Serialize)]
struct Outcome {
    op: OpKind,
    id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Outcome {
    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn execute<P: ItemRepository, S: ItemRepository>(
    svc: &LookupService<P, S>,
    op: Op,
) -> Outcome {
    let result = match op.kind {
        OpKind::Get => svc.locate(op.id),
        OpKind::Delete => svc.remove(op.id),
    };
    match result {
        Ok((tier, item)) => {
            info!(op = %op, tier = %tier, "ok");
            Outcome {
                op: op.kind,
                id: op.id,
                tier: Some(tier),
                item: Some(item),
                error: None,
            }
        }
        Err(e) => {
            warn!(op = %op, error = %e, "failed");
            Outcome {
                op: op.kind,
                id: op.id,
                tier: None,
                item: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&cfg);
    cfg.warn_if_suspicious();

    let svc = build_service(&cfg);
    let ops = match cli.command {
        Command::Get { id } => vec![Op {
            kind: OpKind::Get,
            id,
        }],
        Command::Delete { id } => vec![Op {
            kind: OpKind::Delete,
            id,
        }],
        Command::Run { ops } => ops,
    };

    let mut all_ok = true;
    for op in ops {
        let outcome = execute(&svc, op);
        all_ok &= outcome.is_ok();
        match serde_json::to_string(&outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("failed to encode result for {}: {}", op, e);
                all_ok = false;
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_service(cfg: &config::Config) -> LookupService<InMemoryItemRepo, InMemoryItemRepo> {
    let primary = match &cfg.primary_seed {
        Some(items) => InMemoryItemRepo::with_items(items.clone()),
        None => InMemoryItemRepo::primary(),
    };
    let secondary = match &cfg.secondary_seed {
        Some(items) => InMemoryItemRepo::with_items(items.clone()),
        None => InMemoryItemRepo::secondary(),
    };
    LookupService::new(primary, secondary)
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    tfmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(tfmt::time::SystemTime)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    tfmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
