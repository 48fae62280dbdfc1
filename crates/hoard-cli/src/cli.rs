use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hoard", about = "Content-addressed game asset store", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a hoard.toml; defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the asset server
    Serve(ServeArgs),
    /// Ingest a file into the local store
    Put(PutArgs),
    /// Copy an asset out of the local store
    Get(GetArgs),
    /// Report the format a file would be sniffed as
    Sniff(SniffArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override `server.bind_addr`
    #[arg(long)]
    pub bind: Option<String>,
    /// Override `storage.root`
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct PutArgs {
    pub file: PathBuf,
    /// Claimed identifier; computed from the file when omitted
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Uploader recorded for the asset
    #[arg(long, default_value = "local")]
    pub user: String,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct SniffArgs {
    pub file: PathBuf,
}
