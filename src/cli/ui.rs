use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

const MIN_SMALL_DECIMALS: usize = 8;
const MAX_DECIMALS: usize = 16;

/// Formats an amount with precision suited to its magnitude.
///
/// Values below 1 get at least eight decimals and always keep four
/// significant digits, so weak fiat to BTC rates stay readable.
pub fn format_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1000.0 {
        format!("{value:.2}")
    } else if abs >= 1.0 {
        format!("{value:.4}")
    } else {
        let decimals = if abs > 0.0 {
            let leading_zeros = (-abs.log10().floor()) as usize;
            (leading_zeros + 3).clamp(MIN_SMALL_DECIMALS, MAX_DECIMALS)
        } else {
            MIN_SMALL_DECIMALS
        };
        format!("{value:.decimals$}")
    }
}

/// Right-aligned numeric cell.
pub fn amount_cell(value: f64) -> Cell {
    Cell::new(format_amount(value)).set_alignment(CellAlignment::Right)
}

/// Right-aligned numeric cell in bold green, for results.
pub fn result_cell(value: f64) -> Cell {
    Cell::new(format_amount(value))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown while waiting on providers.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_precision() {
        assert_eq!(format_amount(2500.0), "2500.00");
        assert_eq!(format_amount(0.92), "0.92000000");
        assert_eq!(format_amount(20.0), "20.0000");
        assert_eq!(format_amount(1.0 / 40000.0), "0.00002500");
        assert_eq!(format_amount(0.0), "0.00000000");
    }

    #[test]
    fn test_format_tiny_amount_keeps_significant_digits() {
        // 1 KZT in BTC
        assert_eq!(format_amount(4.1234e-8), "0.00000004123");
        assert_eq!(format_amount(2.5e-10), "0.0000000002500");
    }
}
