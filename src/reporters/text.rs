//! Text (terminal) reporter with colors and formatting

use crate::models::{ComponentCheck, PdfEligibility, ValidationLevel, ValidationStats, Verdict};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const LIGHT_RED: &str = "\x1b[91m";

/// Presentation switches for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// List every profile attempt, not just the final verdict
    pub explain: bool,
    pub emoji: bool,
    /// Emit ANSI escape codes
    pub color: bool,
}

impl TextOptions {
    /// No emoji, no color, no attempt list
    pub fn plain() -> Self {
        Self {
            explain: false,
            emoji: false,
            color: false,
        }
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            explain: false,
            emoji: true,
            color: true,
        }
    }
}

/// Wraps `text` in an escape code when color is on
struct Paint {
    on: bool,
}

impl Paint {
    fn new(options: &TextOptions) -> Self {
        Self { on: options.color }
    }

    fn with(&self, code: &str, text: impl std::fmt::Display) -> String {
        if self.on {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn level_color(level: ValidationLevel) -> &'static str {
    match level {
        ValidationLevel::Strict => GREEN,
        ValidationLevel::Moderate => "\x1b[92m",
        ValidationLevel::Flexible => YELLOW,
        ValidationLevel::Emergency => LIGHT_RED,
        ValidationLevel::EmergencyOverride => RED,
        ValidationLevel::ForcedPass => "\x1b[35m",
    }
}

fn level_badge(level: ValidationLevel, emoji: bool) -> &'static str {
    match (level, emoji) {
        (ValidationLevel::Strict, true) => "🟢",
        (ValidationLevel::Moderate, true) => "🟡",
        (ValidationLevel::Flexible, true) => "🟠",
        (ValidationLevel::Emergency, true) => "🔴",
        (ValidationLevel::EmergencyOverride, true) => "🚨",
        (ValidationLevel::ForcedPass, true) => "⚠️",
        (ValidationLevel::EmergencyOverride, false) => "[!!]",
        (ValidationLevel::ForcedPass, false) => "[!]",
        (_, false) => "[ok]",
    }
}

/// Render a verdict as terminal output
pub fn render_verdict(verdict: &Verdict, options: &TextOptions) -> String {
    let p = Paint::new(options);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", p.with(BOLD, "Analysis Validation")));
    out.push_str(&format!(
        "{}\n",
        p.with(DIM, "──────────────────────────────────────")
    ));

    let badge = level_badge(verdict.level, options.emoji);
    out.push_str(&format!(
        "{} Level: {}  Score: {}  Valid: {}\n",
        badge,
        p.with(level_color(verdict.level), p.with(BOLD, verdict.level)),
        p.with(BOLD, format!("{:.1}/100", verdict.quality_score)),
        if verdict.valid { "yes" } else { "no" }
    ));
    if let Some(session) = &verdict.session_id {
        out.push_str(&format!("{}\n", p.with(DIM, format!("Session: {}", session))));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", p.with(BOLD, "SCORES")));
    let scores: Vec<String> = verdict
        .component_scores
        .entries()
        .iter()
        .map(|(name, score)| format!("{}: {}", capitalize(name), format_score(&p, *score)))
        .collect();
    out.push_str(&format!("  {}\n\n", scores.join("  ")));

    out.push_str(&format!("Reason: {}\n", verdict.primary_reason));
    out.push_str(&format!("Recommendation: {}\n", verdict.recommendation));

    if !verdict.warnings.is_empty() {
        out.push_str(&format!("\n{}\n", p.with(BOLD, "WARNINGS")));
        for warning in &verdict.warnings {
            out.push_str(&format!("  {} {}\n", p.with(YELLOW, "-"), warning));
        }
    }

    if !verdict.errors.is_empty() {
        out.push_str(&format!("\n{}\n", p.with(BOLD, "ERRORS")));
        for error in &verdict.errors {
            out.push_str(&format!("  {} {}\n", p.with(RED, "-"), error));
        }
    }

    if options.explain && !verdict.attempts.is_empty() {
        out.push_str(&format!("\n{}\n", p.with(BOLD, "ATTEMPTS")));
        out.push_str(&format!(
            "{}\n",
            p.with(DIM, "  LEVEL        SCORE    NEEDED   RESULT")
        ));
        for attempt in &verdict.attempts {
            let result = if attempt.accepted {
                p.with(GREEN, "accepted")
            } else {
                p.with(RED, format!("rejected: {}", attempt.reason))
            };
            out.push_str(&format!(
                "  {:<11}  {:>5.1}    {:>5.1}    {}\n",
                attempt.level.as_str(),
                attempt.quality_score,
                attempt.min_quality_score,
                result
            ));
            for error in &attempt.errors {
                out.push_str(&format!("{}\n", p.with(DIM, format!("               {}", error))));
            }
        }
    }

    if verdict.emergency_mode {
        out.push_str(&format!(
            "\n{}\n",
            p.with(DIM, "Data was preserved; fix the data sources and re-run.")
        ));
    }

    out
}

/// Render the profile table
pub fn render_stats(stats: &ValidationStats, options: &TextOptions) -> String {
    let p = Paint::new(options);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", p.with(BOLD, "Validation levels")));
    out.push_str(&format!(
        "{}\n",
        p.with(DIM, "  LEVEL        QUALITY  CONTENT  SOURCES  INSIGHTS  SIM.TOL")
    ));
    for t in &stats.level_thresholds {
        out.push_str(&format!(
            "  {} {:>7.0}  {:>7}  {:>7}  {:>8}  {:>7}\n",
            p.with(level_color(t.level), format!("{:<11}", t.level.as_str())),
            t.min_quality_score,
            t.min_content_length,
            t.min_sources,
            t.min_insights,
            t.simulation_tolerance
        ));
    }

    out.push('\n');
    if stats.emergency_mode_available {
        out.push_str("Emergency override: available (score 25, always valid)\n");
    }
    if stats.forced_pass_available {
        out.push_str("Forced pass: available (score 50, operator supplied reason)\n");
    }
    out
}

/// Render a PDF eligibility decision
pub fn render_pdf(pdf: &PdfEligibility, options: &TextOptions) -> String {
    let p = Paint::new(options);
    let mark = match (pdf.eligible, options.emoji) {
        (true, true) => "✅",
        (false, true) => "❌",
        (true, false) => "[yes]",
        (false, false) => "[no]",
    };
    let verdict = if pdf.eligible {
        p.with(GREEN, "PDF eligible")
    } else {
        p.with(RED, "PDF not eligible")
    };
    format!("{} {}: {}\n", mark, verdict, pdf.reason)
}

/// Render a single-component check
pub fn render_component(check: &ComponentCheck, options: &TextOptions) -> String {
    let p = Paint::new(options);
    let mark = match (check.valid, options.emoji) {
        (true, true) => "✅",
        (false, true) => "⚠️",
        (true, false) => "[ok]",
        (false, false) => "[limited]",
    };
    format!(
        "{} {}: {}\n  {}\n  {}\n",
        mark,
        p.with(BOLD, &check.component),
        format_score(&p, check.score),
        check.reason,
        p.with(DIM, &check.recommendation)
    )
}

fn format_score(p: &Paint, score: f64) -> String {
    let color = if score >= 80.0 {
        GREEN
    } else if score >= 40.0 {
        YELLOW
    } else {
        RED
    };
    p.with(color, format!("{:.0}", score))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
