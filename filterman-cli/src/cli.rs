//! Command line definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use filterman_core::Format;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "filterman",
    version,
    about = "Manage area and sub-area filters",
    long_about = "Build lists of areas and sub-areas, save them as JSON or line files,\n\
                  and copy them out as comma separated lists.\n\n\
                  Areas can be entered in shorthand: `A1, B1-B3, 5-7`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File format, overriding detection from the file extension.
    #[arg(long, value_enum, global = true, env = "FILTERMAN_FORMAT")]
    pub format: Option<FormatArg>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of the default destination.
    #[arg(long = "log-file", value_name = "PATH", global = true, env = "FILTERMAN_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the terminal editor (the default).
    Edit {
        /// Filter file to open.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the areas an area shorthand expands to, one per line.
    Expand {
        #[arg(value_name = "SPEC")]
        spec: String,
    },

    /// Print the comma separated areas and sub-areas of a filter file.
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Copy one of the two lists to the clipboard instead of printing.
        #[arg(long, value_enum)]
        clipboard: Option<ClipboardField>,

        /// Print both lists as a JSON object.
        #[arg(long, conflicts_with = "clipboard")]
        json: bool,
    },

    /// Read a filter file and write it back out, possibly in the other format.
    Convert {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output format (default: from the output extension).
        #[arg(long, value_enum)]
        to: Option<FormatArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Lines,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Lines => Format::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClipboardField {
    Areas,
    SubAreas,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_editor() {
        let cli = Cli::try_parse_from(["filterman"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::try_parse_from([
            "filterman",
            "--format",
            "lines",
            "export",
            "f.txt",
            "--clipboard",
            "sub-areas",
        ])
        .unwrap();

        assert!(matches!(cli.format, Some(FormatArg::Lines)));
        match cli.command {
            Some(Command::Export { clipboard, json, .. }) => {
                assert!(matches!(clipboard, Some(ClipboardField::SubAreas)));
                assert!(!json);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["filterman", "-vv", "expand", "1-3"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
