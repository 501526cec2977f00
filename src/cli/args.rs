//! CLI argument definitions using clap
//!
//! Commands:
//! - seekpage page --data <path> --sort <field[:dir]>... [--limit N] [--after TOKEN]
//! - seekpage inspect-token <TOKEN>

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::sort::SortCriterion;

/// seekpage - keyset pagination over JSON-lines collections
#[derive(Parser, Debug)]
#[command(name = "seekpage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch one page from a JSON-lines collection
    Page {
        /// JSON-lines file, one document per line
        #[arg(long)]
        data: PathBuf,

        /// Sort criterion `field[:asc|desc]`, repeatable, highest priority first
        #[arg(long = "sort", required = true)]
        sort: Vec<SortCriterion>,

        /// Page size (configured default when omitted)
        #[arg(long)]
        limit: Option<usize>,

        /// Token from a previous page
        #[arg(long)]
        after: Option<String>,

        /// Base filter as JSON, e.g. '{"match":{"field":"active","op":{"eq":true}}}'
        #[arg(long)]
        filter: Option<String>,
    },

    /// Decode a token and print the position it carries
    InspectToken {
        /// Token to decode
        token: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::try_parse_from([
            "seekpage",
            "page",
            "--data",
            "docs.jsonl",
            "--sort",
            "score:desc",
            "--sort",
            "_id",
            "--limit",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::Page {
                data, sort, limit, after, filter,
            } => {
                assert_eq!(data, PathBuf::from("docs.jsonl"));
                assert_eq!(sort.len(), 2);
                assert_eq!(sort[0].direction, SortDirection::Desc);
                assert_eq!(sort[1].field, "_id");
                assert_eq!(limit, Some(5));
                assert!(after.is_none());
                assert!(filter.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sort_is_required() {
        assert!(Cli::try_parse_from(["seekpage", "page", "--data", "x"]).is_err());
    }

    #[test]
    fn test_bad_sort_direction_rejected() {
        let result = Cli::try_parse_from([
            "seekpage", "page", "--data", "x", "--sort", "score:up",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from([
            "seekpage",
            "inspect-token",
            "abc",
            "--config",
            "seekpage.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("seekpage.json")));
    }
}
