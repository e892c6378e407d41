//! Diagnostic lines printed while dispatching tasks

use anstyle::{AnsiColor, Reset, RgbColor, Style};

use crate::tasks::definition::TaskDefinition;
use crate::tasks::table::TaskTable;

const ACCENT_RGB: (u8, u8, u8) = (207, 106, 76);

const PRIMARY_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Rgb(RgbColor(
    ACCENT_RGB.0,
    ACCENT_RGB.1,
    ACCENT_RGB.2,
))));
const NAME_STYLE: Style = Style::new().bold();
const DIM_STYLE: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::BrightBlack)));

fn paint(style: Style, text: &str, color: bool) -> String {
    if color {
        format!("{style}{text}{Reset}")
    } else {
        text.to_string()
    }
}

fn render_arrow(color: bool) -> String {
    paint(PRIMARY_COLOR, "❱", color)
}

/// Help text listing every task in the table, in table order.
#[must_use]
pub fn format_usage(table: &TaskTable, color: bool) -> String {
    let mut out = String::from("Please provide a script to run\n");
    for name in table.names() {
        out.push_str("  ");
        out.push_str(&paint(NAME_STYLE, name, color));
        out.push('\n');
    }
    out
}

#[must_use]
pub fn format_script_message(definition: &TaskDefinition, color: bool) -> String {
    format!(
        "{} {} {}\n",
        render_arrow(color),
        paint(DIM_STYLE, "Running script:", color),
        definition
    )
}

#[must_use]
pub fn format_sub_script_message(name: &str, color: bool) -> String {
    format!(
        "{} {} {}\n",
        render_arrow(color),
        paint(DIM_STYLE, "Running sub-script:", color),
        paint(NAME_STYLE, name, color)
    )
}
