use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
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

/// Right aligned cell for a number.
pub fn number_cell(value: f64, format_fn: impl Fn(f64) -> String) -> Cell {
    Cell::new(format_fn(value)).set_alignment(CellAlignment::Right)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Creates a profit cell colored by whether it beats `baseline`.
pub fn profit_cell(profit: f64, baseline: f64) -> Cell {
    let color = if profit >= baseline {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(format!("{profit:.2}"))
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Creates a cell describing whether the optimizer found an interior maximum.
pub fn status_cell(converged: bool) -> Cell {
    if converged {
        Cell::new("optimized").fg(Color::Green)
    } else {
        Cell::new("fallback").fg(Color::Yellow)
    }
}

/// Creates a cell for an error message.
pub fn error_cell(message: &str) -> Cell {
    Cell::new(format!("Error: {message}")).fg(Color::Red)
}
