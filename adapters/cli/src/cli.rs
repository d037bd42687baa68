//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "huecheck",
    version,
    about = "Color-vision screening and confusable color training",
    long_about = "Screen color vision with dot-pattern plates, recommend a display mode,\n\
                  and train discrimination with adaptive confusable color pairs."
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub(crate) log_format: LogFormat,

    /// TOML file overriding canvas, dot and preference settings.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run the plate assessment interactively.
    Assess(AssessArgs),

    /// Render one standard plate.
    Render(RenderArgs),

    /// Classify a finished set of answers.
    Classify(ClassifyArgs),

    /// Generate a confusable color pair.
    Pair(PairArgs),

    /// Play the odd-one-out training game in the terminal.
    Train(TrainArgs),

    /// Show or change the stored display mode.
    Mode(ModeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AssessArgs {
    /// Open a window instead of prompting on the terminal.
    #[arg(long = "window")]
    pub(crate) window: bool,

    /// Write every plate shown as an SVG file into this directory.
    #[arg(long = "out-dir", value_name = "DIR")]
    pub(crate) out_dir: Option<PathBuf>,

    /// Store the verdict and recommended display mode when the assessment completes.
    #[arg(long = "save")]
    pub(crate) save: bool,
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    /// Identifier of a standard plate, such as C1 or RG2.
    #[arg(long = "plate", value_name = "ID")]
    pub(crate) plate: String,

    /// SVG file to write; prints a summary when omitted.
    #[arg(long = "out", value_name = "FILE")]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["answers", "transcript"])))]
pub(crate) struct ClassifyArgs {
    /// Comma-separated zero-based option indices, `-` for an unanswered plate.
    #[arg(long = "answers", value_name = "LIST")]
    pub(crate) answers: Option<String>,

    /// Transcript line printed at the end of `assess`.
    #[arg(long = "transcript", value_name = "TRANSCRIPT")]
    pub(crate) transcript: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct PairArgs {
    /// Confusion axis: auto, luminance, red-green or blue-yellow.
    #[arg(long = "axis", default_value = "auto")]
    pub(crate) axis: String,

    /// Strength of the difference between the two colors.
    #[arg(long = "delta", default_value_t = 28.0, value_parser = parse_delta)]
    pub(crate) delta: f32,

    /// Guarantee a visible lightness difference.
    #[arg(long = "assist")]
    pub(crate) assist: bool,

    /// Seed for a reproducible pair.
    #[arg(long = "seed")]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Args)]
pub(crate) struct TrainArgs {
    /// Number of picks before the game ends.
    #[arg(long = "rounds", default_value_t = 10)]
    pub(crate) rounds: u32,

    /// Confusion axis: auto, luminance, red-green or blue-yellow.
    #[arg(long = "axis", default_value = "auto")]
    pub(crate) axis: String,

    /// Start with assist mode enabled.
    #[arg(long = "assist")]
    pub(crate) assist: bool,

    /// Seed for a reproducible game.
    #[arg(long = "seed")]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Args)]
pub(crate) struct ModeArgs {
    /// New display mode: normal, deuteranopia, protanopia or tritanopia.
    #[arg(value_name = "VALUE")]
    pub(crate) value: Option<String>,
}

/// Accepts finite color differences only.
fn parse_delta(raw: &str) -> Result<f32, String> {
    let delta: f32 = raw
        .trim()
        .parse()
        .map_err(|error| format!("`{raw}` is not a number: {error}"))?;
    if delta.is_finite() {
        Ok(delta)
    } else {
        Err(format!("`{raw}` is not a finite difference"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "huecheck", "pair", "--axis", "red-green", "-vv", "--log-format", "json",
        ])
        .expect("valid arguments");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::Pair(args) => {
                assert_eq!(args.axis, "red-green");
                assert_eq!(args.delta, 28.0);
                assert!(!args.assist);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn classify_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["huecheck", "classify"]).is_err());
        assert!(Cli::try_parse_from([
            "huecheck",
            "classify",
            "--answers",
            "0,0",
            "--transcript",
            "huecheck:v1:e30"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["huecheck", "classify", "--answers", "0,1"]).is_ok());
    }

    #[test]
    fn pair_delta_must_be_finite() {
        for raw in ["NaN", "inf", "-inf", "wide"] {
            assert!(
                Cli::try_parse_from(["huecheck", "pair", "--delta", raw]).is_err(),
                "{raw} was accepted"
            );
        }
        let cli = Cli::try_parse_from(["huecheck", "pair", "--delta", "12.5"])
            .expect("valid arguments");
        match cli.command {
            Command::Pair(args) => assert_eq!(args.delta, 12.5),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mode_value_is_optional() {
        let cli = Cli::try_parse_from(["huecheck", "mode"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Mode(ModeArgs { value: None })));
    }
}
