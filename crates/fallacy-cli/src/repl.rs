//! Interactive analysis session.
//!
//! Plain lines are analyzed; lines starting with `/` are session commands.
//! History lives in this loop's own `AnalysisSession` and is gone on exit.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use console::{style, Term};
use fallacy_core::{
    search_categories, Analysis, AnalysisSession, Classifier, FallacyConfig, KeywordClassifier,
    ThresholdGate,
};
use tracing::info;

use crate::export::write_history_csv;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Stats,
    Clear,
    Export { path: Option<PathBuf> },
    Threshold { value: Option<String> },
    Categories { query: Option<String> },
    Quit,
    Unknown(String),
}

/// `None` means the line is an argument to analyze.
pub fn parse_command(text: &str) -> Option<ReplCommand> {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();
    if lower == "quit" || lower == "exit" {
        return Some(ReplCommand::Quit);
    }
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match cmd.to_lowercase().as_str() {
        "/help" | "/?" => ReplCommand::Help,
        "/history" => ReplCommand::History,
        "/stats" => ReplCommand::Stats,
        "/clear" => ReplCommand::Clear,
        "/export" => ReplCommand::Export {
            path: arg.map(PathBuf::from),
        },
        "/threshold" => ReplCommand::Threshold { value: arg },
        "/categories" | "/learn" => ReplCommand::Categories { query: arg },
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    };
    Some(command)
}

pub struct Repl {
    term: Term,
    config: FallacyConfig,
    gate: ThresholdGate,
    classifier: Box<dyn Classifier>,
    session: AnalysisSession,
}

impl Repl {
    pub fn new(config: FallacyConfig, gate: ThresholdGate) -> Self {
        Self {
            term: Term::stdout(),
            config,
            gate,
            classifier: Box::new(KeywordClassifier::default()),
            session: AnalysisSession::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        info!(
            session_id = %self.session.session_id,
            classifier = self.classifier.name(),
            threshold = self.gate.threshold(),
            "analysis session started"
        );
        println!("Logical fallacy detector. Type an argument, /help for commands, 'quit' to exit.");
        println!("---");

        let stdin = std::io::stdin();
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let mut input = String::new();
            if stdin.read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match parse_command(input) {
                Some(ReplCommand::Quit) => break,
                Some(command) => self.handle(command),
                None => self.analyze(input),
            }
        }

        info!(
            session_id = %self.session.session_id,
            entries = self.session.len(),
            "analysis session ended"
        );
        Ok(())
    }

    fn analyze(&mut self, text: &str) {
        let analysis = self
            .session
            .analyze(text, self.classifier.as_ref(), &self.gate);
        render::print_analysis(&self.term, &analysis);
        if matches!(analysis, Analysis::Accepted { .. }) {
            render::print_done(
                &self.term,
                "Analysis complete! Use /history to see all your analyses.",
            );
        }
    }

    fn handle(&mut self, command: ReplCommand) {
        match command {
            ReplCommand::Help => self.print_help(),
            ReplCommand::History => {
                render::print_history(&self.term, &self.session, self.config.history.recent_limit)
            }
            ReplCommand::Stats => match self.session.stats() {
                Some(stats) => render::print_stats(&self.term, &stats),
                None => {
                    let _ = self.term.write_line("No analyses yet");
                }
            },
            ReplCommand::Clear => {
                self.session.clear();
                render::print_done(&self.term, "History cleared.");
            }
            ReplCommand::Export { path } => {
                let path = path.unwrap_or_else(|| PathBuf::from(&self.config.export.file_name));
                match write_history_csv(&path, self.session.entries()) {
                    Ok(()) => render::print_done(
                        &self.term,
                        &format!(
                            "Exported {} entries to {}",
                            self.session.len(),
                            path.display()
                        ),
                    ),
                    Err(err) => render::print_notice(&self.term, &format!("{err:#}")),
                }
            }
            ReplCommand::Threshold { value: None } => {
                let _ = self.term.write_line(&format!(
                    "Confidence threshold: {}",
                    render::percent(self.gate.threshold())
                ));
            }
            ReplCommand::Threshold { value: Some(raw) } => {
                let parsed = raw
                    .parse::<f64>()
                    .map_err(anyhow::Error::from)
                    .and_then(|v| ThresholdGate::new(v).map_err(anyhow::Error::from));
                match parsed {
                    Ok(gate) => {
                        self.gate = gate;
                        render::print_done(
                            &self.term,
                            &format!("Threshold set to {}", render::percent(gate.threshold())),
                        );
                    }
                    Err(err) => render::print_notice(
                        &self.term,
                        &format!("Invalid threshold '{raw}': {err}"),
                    ),
                }
            }
            ReplCommand::Categories { query } => {
                let hits = search_categories(query.as_deref().unwrap_or(""));
                render::print_category_list(&self.term, &hits);
            }
            ReplCommand::Unknown(cmd) => {
                render::print_notice(&self.term, &format!("Unknown command {cmd}; try /help"))
            }
            ReplCommand::Quit => {}
        }
    }

    fn print_help(&self) {
        let lines = [
            ("/history", "show statistics and recent analyses"),
            ("/stats", "show totals and average confidence"),
            ("/clear", "clear this session's history"),
            ("/export [PATH]", "write history as CSV"),
            ("/threshold [VALUE]", "show or set the confidence threshold"),
            ("/categories [QUERY]", "browse or search the fallacy catalog"),
            ("quit", "leave the session"),
        ];
        for (cmd, about) in lines {
            let _ = self
                .term
                .write_line(&format!("  {:<22} {}", style(cmd).cyan(), about));
        }
    }
}
