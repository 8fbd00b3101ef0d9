//! Terminal rendering for classifications and reversal outcomes.
//!
//! Confidence bands pick the color of a candidate:
//! - High: green
//! - Medium: yellow
//! - Low: bright yellow
//! - Weak: red

use colored::{Color, Colorize};
use hashorbit_core::{Catalog, ConfidenceBand, DeclaredLength, HashFamily, ReversalOutcome};

/// Configuration for pretty printing.
#[derive(Debug, Clone, Copy)]
pub struct PrettyConfig {
    /// Enable colored output.
    pub color: bool,
    /// Indent string (usually 2 spaces).
    pub indent: &'static str,
    /// Show rule summaries next to each candidate.
    pub verbose: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            color: true,
            indent: "  ",
            verbose: false,
        }
    }
}

fn band_color(band: ConfidenceBand) -> Color {
    match band {
        ConfidenceBand::High => Color::Green,
        ConfidenceBand::Medium => Color::Yellow,
        ConfidenceBand::Low => Color::BrightYellow,
        ConfidenceBand::Weak => Color::Red,
    }
}

fn colorize(s: &str, color: Color, enabled: bool) -> String {
    if enabled {
        s.color(color).to_string()
    } else {
        s.to_string()
    }
}

fn dimmed(s: &str, enabled: bool) -> String {
    if enabled {
        s.dimmed().to_string()
    } else {
        s.to_string()
    }
}

fn length_label(length: DeclaredLength) -> String {
    match length {
        DeclaredLength::Fixed(len) => format!("{len} characters"),
        DeclaredLength::Variable => "variable length".to_string(),
    }
}

/// Render one candidate as a header line plus detail lines.
pub fn render_candidate(family: &HashFamily, config: &PrettyConfig) -> String {
    let band = family.band();
    let mut output = String::new();

    let name = if config.color {
        family.name.color(band_color(band)).bold().to_string()
    } else {
        family.name.to_string()
    };
    let reliability = if band == ConfidenceBand::High {
        ", high reliability"
    } else {
        ""
    };
    output.push_str(&format!(
        "{} {} ({}% confidence{})\n",
        colorize("▶", Color::Blue, config.color),
        name,
        family.confidence,
        reliability
    ));

    if !family.description.is_empty() {
        output.push_str(&format!(
            "{}{}\n",
            config.indent,
            dimmed(family.description, config.color)
        ));
    }

    output.push_str(&format!(
        "{}{} length: {}\n",
        config.indent,
        colorize("≈", Color::Blue, config.color),
        length_label(family.length)
    ));

    if config.verbose {
        output.push_str(&format!(
            "{}{} rule: {}\n",
            config.indent,
            colorize("≈", Color::Blue, config.color),
            family.rule.summary()
        ));
    }

    for marker in family.markers {
        output.push_str(&format!(
            "{}{} {}\n",
            config.indent,
            colorize("✓", Color::Magenta, config.color),
            marker
        ));
    }

    output
}

/// Render the outcome of a reversal attempt as a single line.
pub fn render_outcome(outcome: &ReversalOutcome, config: &PrettyConfig) -> String {
    let arrow = colorize("→", Color::Cyan, config.color);
    match outcome {
        ReversalOutcome::Found(plaintext) => format!(
            "{} plaintext: {}",
            arrow,
            colorize(plaintext, Color::Green, config.color)
        ),
        ReversalOutcome::NotFound => format!(
            "{} {}",
            arrow,
            colorize("not found in lookup database", Color::Yellow, config.color)
        ),
        ReversalOutcome::Unsupported(reason) => format!(
            "{} {}",
            arrow,
            dimmed(&format!("reversal unavailable: {reason}"), config.color)
        ),
    }
}

/// Render the whole catalog, grouped by declared length.
///
/// Fixed lengths come first in ascending order, then variable-length formats.
pub fn render_families(catalog: &Catalog, config: &PrettyConfig) -> String {
    let mut output = String::new();

    let mut groups: Vec<(String, Vec<&HashFamily>)> = catalog
        .lengths()
        .into_iter()
        .map(|len| {
            let members = catalog
                .families()
                .iter()
                .filter(|f| f.length == DeclaredLength::Fixed(len))
                .collect();
            (length_label(DeclaredLength::Fixed(len)), members)
        })
        .collect();

    let variable: Vec<&HashFamily> = catalog
        .families()
        .iter()
        .filter(|f| f.length == DeclaredLength::Variable)
        .collect();
    if !variable.is_empty() {
        groups.push((length_label(DeclaredLength::Variable), variable));
    }

    for (label, members) in groups {
        let header = if config.color {
            label.green().bold().to_string()
        } else {
            label
        };
        output.push_str(&format!(
            "{} {}\n",
            colorize("▶", Color::Blue, config.color),
            header
        ));
        for family in members {
            let confidence = colorize(
                &format!("{}%", family.confidence),
                band_color(family.band()),
                config.color,
            );
            output.push_str(&format!(
                "{}{} {} ({}) - {}\n",
                config.indent,
                colorize("→", Color::Cyan, config.color),
                family.name,
                confidence,
                family.description
            ));
        }
        output.push('\n');
    }

    output
}
