use crate::table::{Alignment, Table};
use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

/// Renders a table as fixed-width text for terminals.
pub fn render_text(table: &Table<'_>) -> String {
    let widths = table.column_widths(|text| text.chars().count() as u32);
    let mut out = String::new();

    if let Some(title) = &table.title {
        let _ = writeln!(out, "{title}");
    }
    if widths.is_empty() {
        return out;
    }

    write_line(&mut out, table, &widths, &table.headers);
    write_rule(&mut out, &widths);
    for row in &table.rows {
        write_line(&mut out, table, &widths, row);
    }
    if let Some(footer) = &table.footer {
        write_rule(&mut out, &widths);
        write_line(&mut out, table, &widths, footer);
    }
    if let Some(note) = &table.note {
        let _ = writeln!(out, "{note}");
    }
    out
}

fn write_line(out: &mut String, table: &Table<'_>, widths: &[u32], cells: &[Cow<'_, str>]) {
    let mut line = String::new();
    for (i, &width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let cell = cells.get(i).map_or("", |cell| cell.as_ref());
        pad(&mut line, cell, width as usize, table.alignment(i));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn write_rule(out: &mut String, widths: &[u32]) {
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w as usize)).collect();
    out.push_str(&rule.join(COLUMN_GAP));
    out.push('\n');
}

fn pad(line: &mut String, cell: &str, width: usize, alignment: Alignment) {
    let gap = width.saturating_sub(cell.chars().count());
    let (before, after) = match alignment {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    line.extend(std::iter::repeat_n(' ', before));
    line.push_str(cell);
    line.extend(std::iter::repeat_n(' ', after));
}
