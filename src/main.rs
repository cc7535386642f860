use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use svg_quick_edit::config::load_from_path;
use svg_quick_edit::engine::{run, RunConfig};
use svg_quick_edit::fs::OsFileSystem;
use svg_quick_edit::rules::RuleSet;
use svg_quick_edit::sink::{StderrSink, StdoutSink};
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "\
svg-quick-edit edits attributes of paths in SVG files. It is meant for batch
processing icon sets: change 'fill', 'stroke' or any other attribute of every
<path> whose selector attribute has a given value, and save each changed image
under a new name.

Example:
  svg-quick-edit -f \"class='aac-skin-fill'\" -r fill -v \"#e3ab72\" -s new -p icons/

replaces the 'fill' of every path with class 'aac-skin-fill' in icons/*.svg and
writes each modified image next to the original with a \"_new.svg\" suffix.
Images that are not modified get no new file.

Repeat -f/-r/-v/-s to apply several rules at once; they pair up by position.
The output name lists the suffix of every rule that matched, in rule order,
e.g. \"_skin-e3ab72_hair-a65e26.svg\" when both rules matched, or
\"_hair-a65e26.svg\" when only the second one did.";

#[derive(Parser)]
#[command(name = "svg-quick-edit")]
#[command(about = "Edits attributes of paths in SVG files", long_about = LONG_ABOUT)]
#[command(version)]
struct Cli {
    /// Selector of the paths to edit, e.g. "class='skin'"
    #[arg(short, long = "find", value_name = "SELECTOR")]
    find: Vec<String>,

    /// Attribute to replace the value of
    #[arg(short, long = "replace", value_name = "ATTRIBUTE")]
    replace: Vec<String>,

    /// New value of the attribute
    #[arg(short, long = "value", value_name = "VALUE")]
    value: Vec<String>,

    /// Token added to the file name when this rule matches
    #[arg(short, long = "suffix", value_name = "SUFFIX")]
    suffix: Vec<String>,

    /// SVG file or directory of SVG files
    #[arg(short, long)]
    path: PathBuf,

    /// Regular expression of file paths to skip
    #[arg(short, long)]
    exclude: Option<String>,

    /// TOML file with additional rules, applied before command-line rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report the outcome for every file
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = execute(cli) {
        eprintln!("{} {:#}", "Failed to edit SVG file(s):".red(), err);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    // Shape check first: no file is touched when the rule lists disagree.
    let cli_rules = RuleSet::from_parallel(&cli.find, &cli.replace, &cli.value, &cli.suffix)?;

    let mut rules = RuleSet::default();
    let mut exclude = cli.exclude;

    if let Some(config_path) = &cli.config {
        let file = load_from_path(config_path)?;
        rules = file
            .to_rule_set()
            .with_context(|| format!("invalid rule in {}", config_path.display()))?;
        if exclude.is_none() {
            exclude = file.exclude;
        }
    }
    rules.extend(cli_rules);

    let config = RunConfig::new(cli.path, rules)?
        .with_exclude(exclude.as_deref())?
        .with_verbose(cli.verbose);

    run(&config, &OsFileSystem, &StdoutSink, &StderrSink)?;
    Ok(())
}
