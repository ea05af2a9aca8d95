use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use console::Term;
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod export;
mod render;
mod repl;

use fallacy_core::{
    display_name, list_categories, load_config, lookup_category, samples, samples_for,
    search_categories, Analysis, AnalysisSession, FallacyConfig, KeywordClassifier, ThresholdGate,
};
use fallacy_schema::{CategoryId, ClassificationResult};
use repl::Repl;

#[derive(Parser)]
#[command(
    name = "fallacy",
    version,
    about = "Flag common logical fallacies in short arguments"
)]
struct Cli {
    #[arg(
        long,
        default_value = "~/.fallacy",
        help = "Config root directory (contains config/ and logs/)"
    )]
    config_root: PathBuf,

    #[arg(
        long,
        global = true,
        help = "Minimum confidence (0.0-1.0) for a result to be shown and recorded"
    )]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Analyze one argument")]
    Analyze {
        #[arg(help = "Argument text", conflicts_with = "sample")]
        text: Vec<String>,
        #[arg(long, help = "Analyze a built-in sample from this group instead")]
        sample: Option<String>,
        #[arg(long, default_value = "1", help = "Sample number within the group")]
        index: usize,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    #[command(about = "List known fallacies")]
    Categories {
        #[arg(long, help = "Only show fallacies whose name or definition contains this")]
        search: Option<String>,
    },
    #[command(about = "Show one fallacy by id")]
    Show {
        #[arg(help = "Fallacy id, e.g. \"ad hominem\"")]
        id: String,
    },
    #[command(about = "List sample arguments")]
    Samples {
        #[arg(long, help = "Only show this group")]
        category: Option<String>,
    },
    #[command(about = "Interactive session with history")]
    Chat,
    #[command(about = "Validate config file")]
    Validate,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    result: &'a ClassificationResult,
    display_name: String,
    accepted: bool,
    threshold: f64,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Expand ~ to home directory
    if cli.config_root.starts_with("~") {
        if let Some(home) = std::env::var_os("HOME") {
            cli.config_root = PathBuf::from(home).join(
                cli.config_root
                    .strip_prefix("~")
                    .unwrap_or(&cli.config_root),
            );
        }
    }

    let _guard = init_logging(&cli.config_root)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(&cli.config_root.join("config"))?;
    let gate = resolve_gate(&config, cli.threshold)?;
    let term = Term::stdout();

    match command {
        Commands::Analyze {
            text,
            sample,
            index,
            json,
        } => {
            let input = match sample {
                Some(group) => pick_sample(&group, index)?.to_string(),
                None => text.join(" "),
            };
            run_analyze(&term, &input, &gate, json)?;
        }
        Commands::Categories { search } => {
            let hits = match search.as_deref() {
                Some(query) => search_categories(query),
                None => list_categories().iter().collect(),
            };
            render::print_category_list(&term, &hits);
        }
        Commands::Show { id } => match lookup_category(&id) {
            Some(category) => render::print_category(&term, category),
            None => render::print_notice(
                &term,
                &format!(
                    "No catalog entry for '{id}' (displayed as '{}')",
                    CategoryId::parse(&id).fallback_display_name()
                ),
            ),
        },
        Commands::Samples { category } => match category {
            Some(name) => {
                let group =
                    samples_for(&name).ok_or_else(|| anyhow!("sample group not found: {name}"))?;
                render::print_samples(&term, std::slice::from_ref(group));
            }
            None => render::print_samples(&term, samples()),
        },
        Commands::Chat => {
            Repl::new(config, gate).run()?;
        }
        Commands::Validate => {
            println!(
                "Config valid. threshold {}, recent limit {}, export file {}.",
                render::percent(gate.threshold()),
                config.history.recent_limit,
                config.export.file_name
            );
        }
    }

    Ok(())
}

fn init_logging(config_root: &Path) -> Result<WorkerGuard> {
    let log_dir = config_root.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir: {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "fallacy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Ok(guard)
}

/// `--threshold` wins over the configured value.
fn resolve_gate(config: &FallacyConfig, cli_threshold: Option<f64>) -> Result<ThresholdGate> {
    match cli_threshold {
        Some(value) => ThresholdGate::new(value).context("invalid --threshold"),
        None => config.gate(),
    }
}

fn pick_sample(group: &str, index: usize) -> Result<&'static str> {
    let found = samples_for(group).ok_or_else(|| anyhow!("sample group not found: {group}"))?;
    index
        .checked_sub(1)
        .and_then(|i| found.arguments.get(i))
        .copied()
        .ok_or_else(|| {
            anyhow!(
                "sample index {index} out of range for {} (1-{})",
                found.display_name,
                found.arguments.len()
            )
        })
}

fn run_analyze(term: &Term, input: &str, gate: &ThresholdGate, json: bool) -> Result<()> {
    if input.trim().is_empty() {
        render::print_notice(term, "Please enter an argument to analyze.");
        return Ok(());
    }

    let mut session = AnalysisSession::new();
    let analysis = session.analyze(input, &KeywordClassifier::default(), gate);

    if json {
        let result = analysis.result();
        let output = AnalyzeOutput {
            result,
            display_name: display_name(&result.category_id),
            accepted: matches!(analysis, Analysis::Accepted { .. }),
            threshold: gate.threshold(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_analysis(term, &analysis);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_analyze_words() {
        let cli = Cli::try_parse_from(["fallacy", "analyze", "you", "never", "listen"]).unwrap();
        match cli.command.unwrap() {
            Commands::Analyze { text, json, .. } => {
                assert_eq!(text.join(" "), "you never listen");
                assert!(!json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_global_threshold_after_subcommand() {
        let cli = Cli::try_parse_from(["fallacy", "analyze", "x", "--threshold", "0.8"]).unwrap();
        assert_eq!(cli.threshold, Some(0.8));
    }

    #[test]
    fn sample_conflicts_with_text() {
        assert!(Cli::try_parse_from(["fallacy", "analyze", "x", "--sample", "False Dilemma"])
            .is_err());
        let cli =
            Cli::try_parse_from(["fallacy", "analyze", "--sample", "False Dilemma", "--index", "2"])
                .unwrap();
        assert!(matches!(
            cli.command.unwrap(),
            Commands::Analyze { sample: Some(_), index: 2, .. }
        ));
    }

    #[test]
    fn parses_categories_search() {
        let cli = Cli::try_parse_from(["fallacy", "categories", "--search", "straw"]).unwrap();
        assert!(matches!(
            cli.command.unwrap(),
            Commands::Categories { search: Some(q) } if q == "straw"
        ));
    }

    #[test]
    fn parses_show_and_chat() {
        let cli = Cli::try_parse_from(["fallacy", "show", "ad hominem"]).unwrap();
        assert!(matches!(cli.command.unwrap(), Commands::Show { id } if id == "ad hominem"));
        let cli = Cli::try_parse_from(["fallacy", "chat"]).unwrap();
        assert!(matches!(cli.command.unwrap(), Commands::Chat));
    }

    #[test]
    fn cli_threshold_overrides_config() {
        let config = FallacyConfig::default();
        assert_eq!(resolve_gate(&config, None).unwrap().threshold(), 0.5);
        assert_eq!(resolve_gate(&config, Some(0.9)).unwrap().threshold(), 0.9);
        assert!(resolve_gate(&config, Some(1.5)).is_err());
    }

    #[test]
    fn pick_sample_is_one_based() {
        assert_eq!(
            pick_sample("false dilemma", 1).unwrap(),
            "You're either with us or against us."
        );
        assert!(pick_sample("false dilemma", 0).is_err());
        assert!(pick_sample("false dilemma", 4).is_err());
        assert!(pick_sample("no such group", 1).is_err());
    }

    #[test]
    fn json_output_flattens_result() {
        let result = fallacy_core::classify("You're either with us or against us.");
        let output = AnalyzeOutput {
            result: &result,
            display_name: display_name(&result.category_id),
            accepted: true,
            threshold: 0.5,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["category_id"], "false dilemma");
        assert_eq!(value["confidence"], 0.79);
        assert_eq!(value["display_name"], "False Dilemma");
        assert_eq!(value["accepted"], true);
    }
}
