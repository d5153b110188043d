use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stratus",
    about = "Browse a seeded Swift-style object store mock",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Account configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory tree to seed the account from
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List containers
    Containers(ListArgs),
    /// List objects in a container
    Objects(ObjectsArgs),
    /// Show how a listing splits into pages
    Pages(PagesArgs),
    /// Show account, container, or object details
    Stat(StatArgs),
    /// Print an object's content
    Cat(CatArgs),
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Only names starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
    /// Only names after this one
    #[arg(long)]
    pub marker: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ObjectsArgs {
    pub container: String,
    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args)]
pub struct PagesArgs {
    pub page_size: usize,
    /// Paginate this container's objects instead of the account's containers
    #[arg(long)]
    pub container: Option<String>,
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct StatArgs {
    pub container: Option<String>,
    pub object: Option<String>,
}

#[derive(Args)]
pub struct CatArgs {
    pub container: String,
    pub object: String,
}
