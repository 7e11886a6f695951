pub mod init;
pub mod migrate;
pub mod slug;
pub mod visitors;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signpost")]
#[command(version)]
#[command(about = "Slug routing keys and visitor tallies for a marketing site", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "signpost.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    Migrate,
    Slug {
        #[command(subcommand)]
        command: SlugCommand,
    },
    Visitors {
        #[command(subcommand)]
        command: VisitorsCommand,
    },
}

#[derive(Subcommand)]
pub enum SlugCommand {
    Make {
        title: String,
        #[arg(long)]
        record_id: String,
        #[arg(long)]
        json: bool,
    },
    Parse {
        slug: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum VisitorsCommand {
    Record {
        #[arg(long, conflicts_with_all = ["ip", "user_agent"])]
        key: Option<String>,
        #[arg(long, requires = "user_agent")]
        ip: Option<String>,
        #[arg(long)]
        user_agent: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Stats {
        #[arg(long, default_value = "30")]
        days: i64,
        #[arg(long)]
        json: bool,
    },
}
