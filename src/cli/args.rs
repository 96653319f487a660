use clap::{Parser, Subcommand};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Find a network range in a Micetro IPAM.", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Micetro server URL (defaults to $MICETRO_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API user (defaults to $MICETRO_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// API password (defaults to $MICETRO_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Ansible arguments file; running `findrange <ARGS_FILE>` is the same as `findrange module`
    pub args_file: Option<PathBuf>,
}

/*--------------------------------------------------------------------------------------
  Subcommands
--------------------------------------------------------------------------------------*/

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the first matching range and optionally replace its title
    Find(FindArgs),

    /// Look up the first matching range without changing anything
    Lookup(LookupArgs),

    /// Run as an Ansible binary module with the given arguments file
    Module {
        /// JSON arguments file written by Ansible
        args_file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct FindArgs {
    /// Networks (names or CIDRs) to search, in order
    #[arg(short = 'n', long = "network", required = true)]
    pub networks: Vec<String>,

    /// Prefix length of the range to find
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub prefix_length: u8,

    /// Text the range's title must contain (case-insensitive)
    #[arg(short = 't', long, default_value = "")]
    pub title: String,

    /// Replace the found range's title with this text
    #[arg(long)]
    pub new_title: Option<String>,

    /// Dry run: find the range but do not change its title
    #[arg(long)]
    pub check: bool,

    /// Only descend into ranges with a prefix shorter than this (defaults to the prefix length)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub descent_bound: Option<u8>,
}

#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// Networks (names or CIDRs) to search, in order
    #[arg(short = 'n', long = "network", required = true)]
    pub networks: Vec<String>,

    /// Prefix length of the range to find
    #[arg(short = 'p', long, default_value_t = 28, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub prefix_length: u8,

    /// Text the range's title must contain (case-insensitive)
    #[arg(short = 't', long, default_value = "free")]
    pub title: String,

    /// Only descend into ranges with a prefix shorter than this (defaults to the prefix length)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub descent_bound: Option<u8>,
}
