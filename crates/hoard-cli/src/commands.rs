use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use hoard_crypto::ContentHasher;
use hoard_gate::{FormatTable, Verdict};
use hoard_ingest::{IngestCoordinator, IngestOutcome, IngestRequest, RetrievalGateway};
use hoard_server::{HoardConfig, HoardServer};
use hoard_store::FsBackend;
use hoard_types::CallerIdentity;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config)?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args),
        Command::Put(args) => cmd_put(config, args).map(|_| ()),
        Command::Get(args) => cmd_get(config, args),
        Command::Sniff(args) => cmd_sniff(config, args),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<HoardConfig> {
    match path {
        Some(path) => HoardConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(HoardConfig::default()),
    }
}

fn open_coordinator(config: &HoardConfig, root: Option<PathBuf>) -> anyhow::Result<IngestCoordinator> {
    let root = root.unwrap_or_else(|| config.storage.root.clone());
    let backend = FsBackend::open(root.clone())
        .with_context(|| format!("opening store at {}", root.display()))?;
    Ok(IngestCoordinator::from_config(Arc::new(backend), &config.validator))
}

fn cmd_serve(mut config: HoardConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind.parse().with_context(|| format!("invalid bind address {bind}"))?;
    }
    if let Some(root) = args.root {
        config.storage.root = root;
    }
    println!(
        "Hoard server on {} (root: {})",
        config.server.bind_addr.to_string().bold(),
        config.storage.root.display()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HoardServer::new(config).serve())?;
    Ok(())
}

fn cmd_put(config: HoardConfig, args: PutArgs) -> anyhow::Result<IngestOutcome> {
    let data = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let claimed = args
        .id
        .unwrap_or_else(|| ContentHasher::hash(&data).to_hex());
    let coordinator = open_coordinator(&config, args.root)?;
    tracing::debug!(file = %args.file.display(), claimed = %claimed, bytes = data.len(), "ingesting file");

    let request = IngestRequest::new(CallerIdentity::user(args.user), claimed, data);
    let outcome = coordinator.ingest(&request);
    match &outcome {
        IngestOutcome::Stored { id, format } => {
            println!("{} Stored {} ({})", "✓".green().bold(), id.to_string().yellow(), format);
        }
        IngestOutcome::AlreadyExists { id } => {
            println!("{} Already stored {}", "=".cyan(), id.to_string().yellow());
        }
        other => anyhow::bail!("{} {}", "✗".red().bold(), other),
    }
    Ok(outcome)
}

fn cmd_get(config: HoardConfig, args: GetArgs) -> anyhow::Result<()> {
    let coordinator = open_coordinator(&config, args.root)?;
    let gateway = RetrievalGateway::for_coordinator(&coordinator);
    let data = gateway.retrieve(&args.id)?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, &data).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} {} bytes -> {}", "✓".green().bold(), data.len(), path.display());
        }
        None => std::io::stdout().write_all(&data)?,
    }
    Ok(())
}

fn cmd_sniff(config: HoardConfig, args: SniffArgs) -> anyhow::Result<()> {
    let data = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let table = FormatTable::from_config(&config.validator);
    let sniffed = table.sniff(&data);
    let verdict = match sniffed.verdict {
        Verdict::Allow => "allowed".green(),
        Verdict::Block => "blocked".red(),
    };
    println!("{}: {} ({})", args.file.display(), sniffed.format.to_string().bold(), verdict);
    println!("  Id: {}", ContentHasher::hash(&data).to_string().yellow());
    let size = data.len();
    if size >= config.validator.max_asset_size {
        println!("  Size: {} bytes {}", size, "over limit".red());
    } else {
        println!("  Size: {} bytes", size);
    }
    Ok(())
}
