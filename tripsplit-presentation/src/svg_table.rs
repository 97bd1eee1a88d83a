use crate::table::{Alignment, Table};
use std::{borrow::Cow, fmt::Write};

const FONT_SIZE: u32 = 13;
const CELL_PADDING: u32 = 10;
const LINE_HEIGHT: u32 = FONT_SIZE + CELL_PADDING * 2;
const TITLE_TEXT: &str = "#0f766e";
const HEADER_BG: &str = "#115e59";
const HEADER_TEXT: &str = "#ffffff";
const ROW_BG_EVEN: &str = "#f0fdfa";
const ROW_BG_ODD: &str = "#ccfbf1";
const FOOTER_BG: &str = "#99f6e4";
const ROW_TEXT: &str = "#134e4a";
const NOTE_TEXT: &str = "#64748b";
const BORDER_COLOR: &str = "#5eead4";
const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";
const CHAR_WIDTH: f32 = 7.5;
const STACK_SPACING: u32 = 24;

/// Renders a table as a standalone SVG document. Tables without headers render empty.
pub fn render_svg(table: &Table<'_>) -> String {
    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let col_widths = table.column_widths(estimate_text_width);
    let body_width = col_widths.iter().sum::<u32>() + (col_count as u32 + 1) * CELL_PADDING;
    let caption_width = |text: &Option<Cow<'_, str>>| {
        text.as_deref()
            .map_or(0, |text| estimate_text_width(text) + CELL_PADDING)
    };
    let total_width = body_width
        .max(caption_width(&table.title))
        .max(caption_width(&table.note));

    let title_height = if table.title.is_some() { LINE_HEIGHT } else { 0 };
    let body_lines = 1 + table.rows.len() as u32 + u32::from(table.footer.is_some());
    let body_height = LINE_HEIGHT * body_lines + 2;
    let note_height = if table.note.is_some() { LINE_HEIGHT } else { 0 };
    let total_height = title_height + body_height + note_height;

    let mut svg = String::with_capacity(4096);
    let _ = writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" viewBox="0 0 {total_width} {total_height}">"#
    );
    write_style(&mut svg);

    if let Some(title) = &table.title {
        let _ = writeln!(
            &mut svg,
            r#"<text x="{CELL_PADDING}" y="{}" fill="{TITLE_TEXT}" class="title">{}</text>"#,
            baseline(0),
            escape_xml(title)
        );
    }

    let _ = writeln!(
        &mut svg,
        r#"<rect y="{title_height}" width="{total_width}" height="{body_height}" fill="{BORDER_COLOR}" rx="4" />"#
    );

    let mut y = title_height + 1;
    let header = RowStyle {
        background: HEADER_BG,
        text: HEADER_TEXT,
        class: Some("head"),
    };
    write_row(&mut svg, table, &col_widths, &table.headers, y, total_width, &header);

    for (row_idx, row) in table.rows.iter().enumerate() {
        y += LINE_HEIGHT;
        let style = RowStyle {
            background: if row_idx % 2 == 0 {
                ROW_BG_EVEN
            } else {
                ROW_BG_ODD
            },
            text: ROW_TEXT,
            class: None,
        };
        write_row(&mut svg, table, &col_widths, row, y, total_width, &style);
    }

    if let Some(footer) = &table.footer {
        y += LINE_HEIGHT;
        let style = RowStyle {
            background: FOOTER_BG,
            text: ROW_TEXT,
            class: Some("total"),
        };
        write_row(&mut svg, table, &col_widths, footer, y, total_width, &style);
    }

    if let Some(note) = &table.note {
        let _ = writeln!(
            &mut svg,
            r#"<text x="{CELL_PADDING}" y="{}" fill="{NOTE_TEXT}" class="note">{}</text>"#,
            baseline(title_height + body_height),
            escape_xml(note)
        );
    }

    svg.push_str("</svg>");
    svg
}

struct RowStyle {
    background: &'static str,
    text: &'static str,
    class: Option<&'static str>,
}

fn write_row(
    svg: &mut String,
    table: &Table<'_>,
    col_widths: &[u32],
    cells: &[Cow<'_, str>],
    y: u32,
    total_width: u32,
    style: &RowStyle,
) {
    let _ = writeln!(
        svg,
        r#"<rect x="1" y="{y}" width="{}" height="{LINE_HEIGHT}" fill="{}" />"#,
        total_width - 2,
        style.background
    );

    let class = style
        .class
        .map(|class| format!(r#" class="{class}""#))
        .unwrap_or_default();
    let mut x = CELL_PADDING;
    for (i, (cell, &width)) in cells.iter().zip(col_widths).enumerate() {
        let alignment = table.alignment(i);
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" fill="{}" text-anchor="{}"{class}>{}</text>"#,
            compute_text_x(x, width, alignment),
            baseline(y),
            style.text,
            alignment_anchor(alignment),
            escape_xml(cell)
        );
        x += width + CELL_PADDING;
    }
}

fn write_style(svg: &mut String) {
    let _ = writeln!(
        svg,
        r#"<style>text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; }} .title, .head, .total {{ font-weight: bold; }} .note {{ font-style: italic; }}</style>"#
    );
}

fn baseline(top: u32) -> u32 {
    top + LINE_HEIGHT / 2 + FONT_SIZE / 2 - 2
}

fn estimate_text_width(text: &str) -> u32 {
    let width = text
        .chars()
        .map(|c| {
            if c.is_ascii() {
                CHAR_WIDTH
            } else {
                CHAR_WIDTH * 1.2
            }
        })
        .sum::<f32>();
    (width.ceil() as u32).max(20) + CELL_PADDING * 2
}

fn compute_text_x(cell_x: u32, cell_width: u32, alignment: Alignment) -> u32 {
    match alignment {
        Alignment::Left => cell_x,
        Alignment::Center => cell_x + cell_width / 2,
        Alignment::Right => cell_x + cell_width,
    }
}

fn alignment_anchor(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "start",
        Alignment::Center => "middle",
        Alignment::Right => "end",
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Stacks SVG documents top to bottom, left aligned, into a single report.
///
/// Returns `None` for an empty input or when a document lacks numeric
/// `width`/`height` attributes.
pub fn stack_svgs<S: AsRef<str>>(svgs: &[S]) -> Option<String> {
    if svgs.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(svgs.len());
    for svg in svgs {
        let svg = svg.as_ref();
        let width = extract_svg_dimension(svg, "width")?;
        let height = extract_svg_dimension(svg, "height")?;
        parts.push((width, height, extract_svg_body(svg)?));
    }

    let total_width = parts.iter().map(|(width, _, _)| *width).max().unwrap_or(0);
    let total_height = parts.iter().map(|(_, height, _)| *height).sum::<u32>()
        + STACK_SPACING * (parts.len() as u32 - 1);

    let capacity = parts.iter().map(|(_, _, body)| body.len() + 64).sum::<usize>() + 512;
    let mut combined = String::with_capacity(capacity);
    let _ = writeln!(
        &mut combined,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{total_height}" viewBox="0 0 {total_width} {total_height}">"#
    );
    write_style(&mut combined);

    let mut y_offset = 0u32;
    for (_, height, body) in parts {
        let _ = writeln!(&mut combined, r#"<g transform="translate(0, {y_offset})">"#);
        combined.push_str(&body);
        combined.push_str("</g>\n");
        y_offset += height + STACK_SPACING;
    }

    combined.push_str("</svg>");
    Some(combined)
}

fn extract_svg_dimension(svg: &str, attr: &str) -> Option<u32> {
    let pattern = format!(" {attr}=\"");
    let start = svg.find(&pattern)? + pattern.len();
    let end = svg[start..].find('"')? + start;
    svg[start..end].parse().ok()
}

/// Content between the root element tags, without the `<style>` block.
fn extract_svg_body(svg: &str) -> Option<String> {
    const STYLE_OPEN: &str = "<style>";
    const STYLE_CLOSE: &str = "</style>";

    let start = svg.find('>')? + 1;
    let end = svg.rfind("</svg>")?;
    let content = &svg[start..end];

    let body = match (content.find(STYLE_OPEN), content.find(STYLE_CLOSE)) {
        (Some(open), Some(close)) if open < close => {
            format!(
                "{}{}",
                &content[..open],
                &content[close + STYLE_CLOSE.len()..]
            )
        }
        _ => content.to_owned(),
    };
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_table() -> Table<'static> {
        Table::new()
            .title("Cost split")
            .headers(["Name", "Quota"])
            .alignments([Alignment::Left, Alignment::Right])
            .row(vec![Cow::Borrowed("Ana"), Cow::Borrowed("$75.00")])
            .row(vec![Cow::Borrowed("Bia & Caio"), Cow::Borrowed("$25.00")])
            .footer(vec![Cow::Borrowed("Total"), Cow::Borrowed("$100.00")])
            .note("* manually set amount")
    }

    #[test]
    fn renders_title_rows_footer_and_note() {
        let svg = render_svg(&sample_table());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for text in ["Cost split", "Ana", "$75.00", "Bia &amp; Caio", "Total", "$100.00"] {
            assert!(svg.contains(text), "missing {text}");
        }
        assert!(svg.contains(r#"class="note">* manually set amount</text>"#));
        assert!(svg.contains(r#"text-anchor="end""#));
        // title, header, two rows, footer, note
        assert_eq!(
            extract_svg_dimension(&svg, "height"),
            Some(LINE_HEIGHT * 6 + 2)
        );
    }

    #[test]
    fn table_without_headers_renders_nothing() {
        assert!(render_svg(&Table::new()).is_empty());
    }

    #[rstest]
    #[case::escapes_all("<test & 'value'>", "&lt;test &amp; &#39;value&#39;&gt;")]
    #[case::keeps_plain("Alimentação", "Alimentação")]
    fn test_escape_xml(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_xml(input), expected);
    }

    #[test]
    fn stacks_documents_with_spacing() {
        let first = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><style>x</style><text>First</text></svg>"#;
        let second = r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="60"><text>Second</text></svg>"#;

        let stacked = stack_svgs(&[first, second]).expect("stacked svg");

        assert!(stacked.contains("<text>First</text>"));
        assert!(stacked.contains("<text>Second</text>"));
        assert!(!stacked.contains("<style>x</style>"));
        assert!(stacked.contains(r#"width="120""#));
        assert!(stacked.contains(&format!(r#"height="{}""#, 110 + STACK_SPACING)));
        assert!(stacked.contains(&format!("translate(0, {})", 50 + STACK_SPACING)));
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::no_dimensions(&["<svg><text>x</text></svg>"])]
    fn stack_rejects_unusable_input(#[case] svgs: &[&str]) {
        assert!(stack_svgs(svgs).is_none());
    }
}
