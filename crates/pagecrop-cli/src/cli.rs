use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pagecrop::CropRatio;

use crate::shared::parse_ratio;

/// Cluster similar PDF pages and crop them.
#[derive(Debug, Parser)]
#[command(name = "pagecrop", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG
    /// takes precedence when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show page boxes, rotation, metadata and bookmarks
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Group pages of similar size into clusters
    Clusters {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Keep odd and even pages in separate clusters
        #[arg(long)]
        split_odd_even: bool,

        /// Pages that are never cropped (e.g. '1,3-5')
        #[arg(long, value_name = "RANGE")]
        exclude: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Crop pages and write a new PDF
    Crop {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path of the cropped PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// JSON crop plan mapping page numbers to lists of [left, bottom, right, top] ratios
        #[arg(long, value_name = "PLAN", required_unless_present = "ratio", conflicts_with = "ratio")]
        plan: Option<PathBuf>,

        /// Crop ratio applied to every cluster; repeat to split pages into several crops
        #[arg(long, value_name = "L,B,R,T", value_parser = parse_ratio)]
        ratio: Vec<CropRatio>,

        /// Pages that are copied without cropping (e.g. '1,3-5')
        #[arg(long, value_name = "RANGE")]
        exclude: Option<String>,
    },
}

/// Output format for inspection commands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn crop_accepts_repeated_ratios() {
        let cli = Cli::try_parse_from([
            "pagecrop",
            "crop",
            "in.pdf",
            "-o",
            "out.pdf",
            "--ratio",
            "0,0,0.5,0",
            "--ratio",
            "0.5,0,0,0",
        ])
        .unwrap();
        match cli.command {
            Commands::Crop { ratio, plan, .. } => {
                assert_eq!(ratio.len(), 2);
                assert_eq!(ratio[1], CropRatio::new(0.5, 0.0, 0.0, 0.0));
                assert!(plan.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn crop_requires_plan_or_ratio() {
        assert!(Cli::try_parse_from(["pagecrop", "crop", "in.pdf", "-o", "out.pdf"]).is_err());
    }

    #[test]
    fn crop_rejects_plan_and_ratio_together() {
        let result = Cli::try_parse_from([
            "pagecrop", "crop", "in.pdf", "-o", "out.pdf", "--plan", "p.json", "--ratio",
            "0,0,0,0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn crop_has_no_odd_even_split() {
        let result = Cli::try_parse_from([
            "pagecrop",
            "crop",
            "in.pdf",
            "-o",
            "out.pdf",
            "--ratio",
            "0,0,0,0",
            "--split-odd-even",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_is_global_and_counted() {
        let cli = Cli::try_parse_from(["pagecrop", "info", "in.pdf", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
