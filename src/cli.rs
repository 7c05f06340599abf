//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pddl-check")]
#[command(author, version, about = "Lex, parse and validate PDDL domains and problems", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Report output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail on warnings as well as errors
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one or more domain files
    Domain {
        /// Domain files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate a problem file
    Problem {
        /// Problem file to validate
        file: PathBuf,

        /// Domain file to cross-validate the problem against
        #[arg(short, long)]
        domain: Option<PathBuf>,
    },

    /// Validate a domain and a problem against it
    Full {
        /// Domain file
        domain: PathBuf,

        /// Problem file
        problem: PathBuf,
    },

    /// Print the token stream of a file
    Tokens {
        /// File to scan
        file: PathBuf,
    },
}
