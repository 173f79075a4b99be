#![forbid(unsafe_code)]
//! Audience Annotations Command Line Interface

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use audience::commands::{
    execute_evaluate, execute_filter, execute_init, execute_options, EvaluateOptions,
    FilterOptions, InitOptions, PolicyArgs,
};
use audience::config::DEFAULT_CONFIG_FILE;
use audience::{Audience, Config, ElementKind, OutputFormat, Preset, StabilityLevel};

#[derive(Parser)]
#[command(name = "audience")]
#[command(about = "Audience and stability filtering for generated API views")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Policy switches shared by the evaluating commands
#[derive(clap::Args, Debug, Clone)]
struct PolicyFlags {
    /// Minimum stability to include
    #[arg(long, value_enum)]
    stability: Option<StabilityArg>,

    /// Exclude classes and interfaces that carry no audience marker
    #[arg(long)]
    treat_unannotated_types_as_private: bool,

    /// Start from a named preset instead of the config file
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
}

impl PolicyFlags {
    fn into_args(self) -> PolicyArgs {
        PolicyArgs {
            preset: self.preset.map(Preset::from),
            stability: self.stability.map(StabilityLevel::from),
            treat_unannotated_types_as_private: self.treat_unannotated_types_as_private,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Stability threshold to record
        #[arg(long, value_enum)]
        stability: Option<StabilityArg>,

        /// Record strict mode for unannotated types
        #[arg(long)]
        treat_unannotated_types_as_private: bool,

        /// Preset to record
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },

    /// Evaluate a single element
    Evaluate {
        /// Declaration kind
        #[arg(long, value_enum, default_value = "class")]
        kind: KindArg,

        /// Audience marker (public, limited-private, private)
        #[arg(long)]
        audience: Option<String>,

        /// Stability marker carried by the element
        #[arg(long = "marker", value_enum)]
        marker: Option<StabilityArg>,

        #[command(flatten)]
        policy: PolicyFlags,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter an element manifest down to its visible API
    Filter {
        /// Manifest file (.json, .yaml, .yml)
        manifest: PathBuf,

        #[command(flatten)]
        policy: PolicyFlags,

        /// Output format (defaults to the config's output.format)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Write the surface to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the decision for every evaluated element
        #[arg(long)]
        explain: bool,
    },

    /// List policy switches and presets
    Options,
}

/// Stability level argument
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StabilityArg {
    Stable,
    Evolving,
    Unstable,
}

impl From<StabilityArg> for StabilityLevel {
    fn from(arg: StabilityArg) -> Self {
        match arg {
            StabilityArg::Stable => StabilityLevel::Stable,
            StabilityArg::Evolving => StabilityLevel::Evolving,
            StabilityArg::Unstable => StabilityLevel::Unstable,
        }
    }
}

/// Declaration kind argument
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Package,
    Module,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Constructor,
    Method,
    Field,
    EnumConstant,
    Parameter,
    Other,
}

impl From<KindArg> for ElementKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Package => ElementKind::Package,
            KindArg::Module => ElementKind::Module,
            KindArg::Class => ElementKind::Class,
            KindArg::Interface => ElementKind::Interface,
            KindArg::Enum => ElementKind::Enum,
            KindArg::Record => ElementKind::Record,
            KindArg::AnnotationType => ElementKind::AnnotationType,
            KindArg::Constructor => ElementKind::Constructor,
            KindArg::Method => ElementKind::Method,
            KindArg::Field => ElementKind::Field,
            KindArg::EnumConstant => ElementKind::EnumConstant,
            KindArg::Parameter => ElementKind::Parameter,
            KindArg::Other => ElementKind::Other,
        }
    }
}

/// Preset argument
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    ExcludePrivate,
    IncludePublic,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::ExcludePrivate => Preset::ExcludePrivate,
            PresetArg::IncludePublic => Preset::IncludePublic,
        }
    }
}

/// Output format argument
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Tree,
    Json,
    Yaml,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("audience={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read the config for commands that evaluate elements
fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load_if_present(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { force, stability, treat_unannotated_types_as_private, preset } => {
            let options = InitOptions {
                path: cli.config,
                force,
                preset: preset.map(Preset::from),
                stability: stability.map(StabilityLevel::from),
                treat_unannotated_types_as_private,
            };
            execute_init(options)?;
        }

        Commands::Evaluate { kind, audience, marker, policy, json } => {
            let config = load_config(&cli.config)?;
            let audience = audience.map(|a| a.parse::<Audience>()).transpose()?;
            let options = EvaluateOptions {
                audience,
                stability: marker.map(StabilityLevel::from),
                kind: ElementKind::from(kind),
                json,
            };
            let decision = execute_evaluate(options, policy.into_args().resolve(&config))?;
            if !decision.included {
                std::process::exit(1);
            }
        }

        Commands::Filter { manifest, policy, format, output, explain } => {
            let config = load_config(&cli.config)?;
            let format = match format {
                Some(FormatArg::Tree) => OutputFormat::Tree,
                Some(FormatArg::Json) => OutputFormat::Json,
                Some(FormatArg::Yaml) => OutputFormat::Yaml,
                None => config.output.format,
            };
            let options = FilterOptions {
                manifest,
                format,
                output,
                explain: explain || config.output.explain,
            };
            execute_filter(options, policy.into_args().resolve(&config))?;
        }

        Commands::Options => {
            execute_options()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_kind_parses_kebab_case() {
        let args = ["audience", "evaluate", "--kind", "annotation-type"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Evaluate { kind, .. } => {
                assert_eq!(ElementKind::from(kind), ElementKind::AnnotationType);
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_evaluate_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["audience", "evaluate", "--kind", "lambda"]).is_err());
    }
}
