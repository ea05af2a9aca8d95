use console::{style, Emoji, Term};
use fallacy_core::{category, Analysis, AnalysisSession, HistoryStats, SampleGroup};
use fallacy_schema::{ClassificationResult, FallacyCategory};

pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "> ");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "√ ");
pub static BOOK: Emoji<'_, '_> = Emoji("📚 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📈 ", "");

const GAUGE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;

/// `0.82` -> `"82.0%"`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Gauge band: below 50%, 50-75%, 75% and up.
pub fn band(confidence: f64) -> &'static str {
    if confidence < 0.5 {
        "low"
    } else if confidence < 0.75 {
        "moderate"
    } else {
        "high"
    }
}

pub fn gauge(confidence: f64, width: usize) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {} ({})",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent(confidence),
        band(confidence)
    )
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "▇".repeat(len)
}

pub fn print_result(
    term: &Term,
    display_name: &str,
    result: &ClassificationResult,
    category: Option<&FallacyCategory>,
) {
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{}{}",
        TARGET,
        style(display_name).bold().magenta()
    ));
    let _ = term.write_line(&format!(
        "   {} {}",
        style("Confidence:").bold(),
        style(percent(result.confidence)).green().bold()
    ));
    let _ = term.write_line(&format!(
        "   {} {}",
        style("Explanation:").bold(),
        result.explanation
    ));
    let _ = term.write_line(&format!(
        "   {}",
        style(gauge(result.confidence, GAUGE_WIDTH)).magenta()
    ));

    if let Some(category) = category {
        let _ = term.write_line(&format!(
            "\n{}{}",
            BOOK,
            style("Learn more about this fallacy").bold()
        ));
        let _ = term.write_line(&format!("   Definition: {}", category.definition));
        let _ = term.write_line(&format!(
            "   Why it's problematic: {}",
            category.why_problematic
        ));
        let _ = term.write_line(&format!(
            "   Example: {}",
            style(format!("\"{}\"", category.example)).italic()
        ));
    }
}

/// Result card for an accepted analysis, or the below-threshold notice.
pub fn print_analysis(term: &Term, analysis: &Analysis) {
    match analysis {
        Analysis::Accepted {
            result,
            display_name,
            ..
        } => print_result(term, display_name, result, category(&result.category_id)),
        Analysis::BelowThreshold { result, threshold } => {
            print_below_threshold(term, result.confidence, *threshold)
        }
    }
}

pub fn print_below_threshold(term: &Term, confidence: f64, threshold: f64) {
    let _ = term.write_line(&format!(
        "{}{}",
        WARNING,
        style(format!(
            "Confidence ({}) is below threshold ({}). Try lowering the threshold.",
            percent(confidence),
            percent(threshold)
        ))
        .yellow()
    ));
}

pub fn print_done(term: &Term, msg: &str) {
    let _ = term.write_line(&format!("{}{}", CHECKMARK, style(msg).green()));
}

pub fn print_notice(term: &Term, msg: &str) {
    let _ = term.write_line(&format!("{}{}", WARNING, style(msg).yellow()));
}

pub fn print_category(term: &Term, category: &FallacyCategory) {
    let _ = term.write_line(&format!(
        "{} {}",
        style(category.display_name).bold().magenta(),
        style(format!("({})", category.id)).dim()
    ));
    let _ = term.write_line(&format!("   Definition: {}", category.definition));
    let _ = term.write_line(&format!("   Why problematic: {}", category.why_problematic));
    let _ = term.write_line(&format!(
        "   Example: {}",
        style(format!("\"{}\"", category.example)).italic()
    ));
}

pub fn print_category_list(term: &Term, categories: &[&FallacyCategory]) {
    if categories.is_empty() {
        let _ = term.write_line("No fallacies match that search.");
        return;
    }
    for (idx, category) in categories.iter().enumerate() {
        if idx > 0 {
            let _ = term.write_line("");
        }
        print_category(term, category);
    }
}

pub fn print_samples(term: &Term, groups: &[SampleGroup]) {
    for group in groups {
        let _ = term.write_line(&format!("{}", style(group.display_name).bold()));
        for (idx, text) in group.arguments.iter().enumerate() {
            let _ = term.write_line(&format!("   {}. {}", idx + 1, text));
        }
    }
}

pub fn print_stats(term: &Term, stats: &HistoryStats) {
    let _ = term.write_line(&format!(
        "{}{}",
        CHART,
        style("Analysis History").bold().cyan()
    ));
    let _ = term.write_line(&format!("   Total analyses: {}", stats.total));
    let _ = term.write_line(&format!("   Most common:    {}", stats.most_common));
    let _ = term.write_line(&format!(
        "   Avg confidence: {}",
        percent(stats.average_confidence)
    ));
}

pub fn print_history(term: &Term, session: &AnalysisSession, limit: usize) {
    let Some(stats) = session.stats() else {
        let _ = term.write_line("No analysis history yet. Type an argument to analyze it.");
        return;
    };
    print_stats(term, &stats);

    let distribution = session.distribution();
    let max = distribution.first().map(|(_, count)| *count).unwrap_or(0);
    let _ = term.write_line(&format!("\n{}", style("Fallacy distribution").bold()));
    for (name, count) in &distribution {
        let _ = term.write_line(&format!(
            "   {:<22} {} {}",
            name,
            style(bar(*count, max)).magenta(),
            count
        ));
    }

    let histogram = session.confidence_histogram(10);
    let max = histogram.iter().copied().max().unwrap_or(0);
    let _ = term.write_line(&format!("\n{}", style("Confidence scores").bold()));
    for (idx, count) in histogram.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let _ = term.write_line(&format!(
            "   {:>3}-{:<4} {} {}",
            idx * 10,
            format!("{}%", (idx + 1) * 10),
            style(bar(*count, max)).magenta(),
            count
        ));
    }

    let _ = term.write_line(&format!("\n{}", style("Recent analyses").bold()));
    let _ = term.write_line(&format!(
        "   {:<50} {:<22} {:>10}",
        "TEXT", "FALLACY", "CONFIDENCE"
    ));
    for entry in session.recent(limit) {
        let _ = term.write_line(&format!(
            "   {:<50} {:<22} {:>10}",
            truncate_cell(&entry.text_snippet, 50),
            entry.category_display_name,
            percent(entry.confidence)
        ));
    }
}

fn truncate_cell(text: &str, width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let kept: String = flat.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
