//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use wealthtrack_core::constants::DISPLAY_DECIMAL_PRECISION;

/// Prints rows as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Formats an amount as dollars with thousands separators, e.g. `-$1,234.56`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let formatted = format!("{:.prec$}", value.abs(), prec = DISPLAY_DECIMAL_PRECISION);
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, fraction)
    }
}

/// Formats a percentage with an explicit sign, e.g. `+12.50%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.prec$}%", sign, value, prec = DISPLAY_DECIMAL_PRECISION)
}

/// Formats a 0-100 score.
pub fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

/// Colors a formatted value green for gains and red for losses.
pub fn colorize_change(text: String, value: f64) -> String {
    if value > 0.0 {
        text.green().to_string()
    } else if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
