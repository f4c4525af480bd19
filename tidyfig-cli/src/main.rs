use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::{error, info, LevelFilter};
use tidyfig::error::TidyfigError;
use tidyfig::export::{export_vector_file, rewrite_vector_file};
use tidyfig::options::ExportOptions;
use tidyfig::pipeline::{layout_figure, read_figure, FigureLayout};
use tidyfig_eps::markers::TargetFamily;
use tidyfig_text::measurement::default_text_measurer;

/// Lay out rendered charts for publication and clean up their exported EPS files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity, on top of the Verbosity option
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OptionArgs {
    /// JSON file of export options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a single option, e.g. `--set Journal=Nature`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    assignments: Vec<String>,
}

impl OptionArgs {
    fn load(&self) -> Result<ExportOptions, TidyfigError> {
        let mut options = match &self.config {
            Some(path) => ExportOptions::from_path(path)?,
            None => ExportOptions::default(),
        };
        for assignment in &self.assignments {
            options.apply_assignment(assignment)?;
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the layout of a figure and print it as JSON
    Layout {
        /// Figure description (.json)
        figure: PathBuf,

        #[command(flatten)]
        options: OptionArgs,

        /// Write the layout here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite fonts and bounding box of an EPS file in place
    Rewrite {
        /// Exported vector file (.eps)
        file: PathBuf,

        /// Canvas width in points
        #[arg(long)]
        width: f32,

        /// Canvas height in points
        #[arg(long)]
        height: f32,

        /// Family the rewritten file should reference
        #[arg(long, default_value = "Arial")]
        font_family: String,
    },

    /// Lay out a figure and rewrite the EPS file exported from it
    Export {
        /// Figure description (.json)
        figure: PathBuf,

        /// Exported vector file (.eps)
        file: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },
}

fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Configured verbosity raised by repeated `-v` flags
fn effective_verbosity(configured: u8, flags: u8) -> u8 {
    configured.saturating_add(flags)
}

fn init_logger(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbosity))
        .parse_default_env()
        .init();
}

fn write_layout(layout: &FigureLayout, output: Option<&Path>) -> Result<(), TidyfigError> {
    let text = serde_json::to_string_pretty(layout).map_err(TidyfigError::Serialize)?;
    match output {
        Some(path) => {
            fs::write(path, text).map_err(|source| TidyfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Wrote layout to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), TidyfigError> {
    match cli.command {
        Commands::Layout {
            figure,
            options,
            output,
        } => {
            let options = options.load()?;
            init_logger(effective_verbosity(options.verbosity, cli.verbose));
            let figure = read_figure(&figure)?;
            let layout = layout_figure(&figure, &options, default_text_measurer())?;
            write_layout(&layout, output.as_deref())
        }
        Commands::Rewrite {
            file,
            width,
            height,
            font_family,
        } => {
            init_logger(effective_verbosity(1, cli.verbose));
            let target = TargetFamily::from_family(&font_family)?;
            let report = rewrite_vector_file(&file, [width, height], target)?;
            info!("Rewrote {}: {report:?}", file.display());
            Ok(())
        }
        Commands::Export {
            figure,
            file,
            options,
        } => {
            let options = options.load()?.with_filename(file);
            init_logger(effective_verbosity(options.verbosity, cli.verbose));
            let figure = read_figure(&figure)?;
            let layout = layout_figure(&figure, &options, default_text_measurer())?;
            write_layout(&layout, None)?;
            if let Some(outcome) = export_vector_file(&options)? {
                if let Some(message) = outcome.message {
                    eprintln!("{message}");
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(0), LevelFilter::Error);
        assert_eq!(level_filter(2), LevelFilter::Info);
        assert_eq!(level_filter(9), LevelFilter::Trace);
    }

    #[test]
    fn test_effective_verbosity_saturates() {
        assert_eq!(effective_verbosity(1, 2), 3);
        assert_eq!(effective_verbosity(1, u8::MAX), u8::MAX);
        assert_eq!(level_filter(effective_verbosity(4, u8::MAX)), LevelFilter::Trace);
    }

    #[test]
    fn test_parse_layout_command() {
        let cli = Cli::try_parse_from([
            "tidyfig",
            "-vv",
            "layout",
            "figure.json",
            "--set",
            "Journal=Nature",
            "--set",
            "Width=double",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Layout { options, output, .. } = cli.command else {
            panic!("expected the layout command");
        };
        assert_eq!(output, None);
        let options = options.load().unwrap();
        assert_eq!(options.canvas(), [518.0, 235.0]);
    }

    #[test]
    fn test_parse_rewrite_command() {
        let cli = Cli::try_parse_from([
            "tidyfig", "rewrite", "figure.eps", "--width", "252", "--height", "235",
        ])
        .unwrap();
        let Commands::Rewrite {
            width,
            height,
            font_family,
            ..
        } = cli.command
        else {
            panic!("expected the rewrite command");
        };
        assert_eq!([width, height], [252.0, 235.0]);
        assert_eq!(font_family, "Arial");
    }
}
