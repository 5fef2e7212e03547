use std::path::PathBuf;

use asciitree::codec::Format;
use clap::{Parser, Subcommand};

use super::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Convert between tree diagrams and indented Markdown lists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// The directory holding asciitree.yaml
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rewrite a document in another format
    Convert {
        file: PathBuf,
        #[clap(long, value_enum)]
        from: Format,
        #[clap(long, value_enum)]
        to: Format,
    },
    /// List every error in a document
    Validate {
        file: PathBuf,
        #[clap(long, value_enum)]
        format: Format,
    },
    /// Print a share token for a document
    Share {
        file: PathBuf,
        #[clap(long, value_enum)]
        format: Format,
    },
    /// Print the document stored in a share token
    Unshare {
        token: String,
        #[clap(long, value_enum, default_value = "markdown")]
        to: Format,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_takes_both_formats() {
        let cli = Cli::parse_from(["asciitree", "convert", "tree.txt", "--from", "ascii", "--to", "markdown"]);
        assert_eq!(
            cli.command,
            Command::Convert {
                file: PathBuf::from("tree.txt"),
                from: Format::Ascii,
                to: Format::Markdown,
            }
        );
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn global_flags_may_follow_the_subcommand() {
        let cli = Cli::parse_from(["asciitree", "validate", "doc.md", "--format", "markdown", "-l", "debug"]);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn unshare_defaults_to_markdown() {
        let cli = Cli::parse_from(["asciitree", "unshare", "abc"]);
        assert!(matches!(cli.command, Command::Unshare { to: Format::Markdown, .. }));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["asciitree", "share", "doc", "--format", "yaml"]);
        assert!(result.is_err());
    }
}
