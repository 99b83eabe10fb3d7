use marquee_core::layout::{scroll_height, ColumnWidth, ColumnWidths};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::theme::Theme;

pub struct MarqueeTableWidget;

impl MarqueeTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let border_style = if app.paused {
            Style::default().fg(app.theme.grey0)
        } else {
            Style::default().fg(app.theme.accent)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(app.theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let list = &app.config.list;
        let header_height = if list.header.show {
            list.header.height.min(inner.height)
        } else {
            0
        };
        let body_height = scroll_height(list, inner.height);

        let [header_area, body_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(body_height),
        ])
        .areas(inner);

        let widths = column_widths(&app.columns, app.data.column_count(), inner.width);

        if let Some(header) = app.data.header.as_ref().filter(|_| header_height > 0) {
            let style = Style::default()
                .fg(app.theme.header)
                .bg(app.theme.bg2)
                .add_modifier(Modifier::BOLD);
            let mut lines = cell_lines(header, &widths, 1, style);
            lines.resize(header_height as usize, Line::styled("", style));
            frame.render_widget(Paragraph::new(lines).style(style), header_area);
        }

        // Rows only exist for the marquee once the list has been laid out
        app.layout_rows();

        let lines = body_lines(&app.data.rows, app.row_heights(), &widths, &app.theme);
        let visible = visible_window(&lines, app.viewport.position(), body_area.height);
        frame.render_widget(Paragraph::new(visible), body_area);
    }
}

/// Column widths in cells for a list `width` cells wide, one cell apart
pub fn column_widths(columns: &ColumnWidths, count: usize, width: u16) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }

    let constraints: Vec<Constraint> = (0..count)
        .map(|index| match columns {
            ColumnWidths::Even => Constraint::Ratio(1, count as u32),
            _ => match columns.get(index) {
                ColumnWidth::Auto => Constraint::Fill(1),
                ColumnWidth::Length(cells) => Constraint::Length(cells),
                ColumnWidth::Percent(percent) => Constraint::Percentage(percent),
            },
        })
        .collect();

    Layout::horizontal(constraints)
        .spacing(1)
        .split(Rect::new(0, 0, width, 1))
        .iter()
        .map(|rect| rect.width)
        .collect()
}

/// Truncate or pad `text` to exactly `width` cells
pub fn fit_cell(text: &str, width: u16) -> String {
    let width = width as usize;
    let mut out = String::new();
    let mut used = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }

    out.push_str(&" ".repeat(width - used));
    out
}

/// Render one row as `height` lines of padded cells
fn cell_lines(row: &[String], widths: &[u16], height: u32, style: Style) -> Vec<Line<'static>> {
    (0..height as usize)
        .map(|line_index| {
            let mut spans = Vec::with_capacity(widths.len() * 2);
            for (column, width) in widths.iter().enumerate() {
                if column > 0 {
                    spans.push(Span::styled(" ", style));
                }
                let text = row
                    .get(column)
                    .and_then(|cell| cell.lines().nth(line_index))
                    .unwrap_or("");
                spans.push(Span::styled(fit_cell(text, *width), style));
            }
            Line::from(spans)
        })
        .collect()
}

/// Every line of one full pass over the rows, with alternating row colors
pub fn body_lines(
    rows: &[Vec<String>],
    heights: &[u32],
    widths: &[u16],
    theme: &Theme,
) -> Vec<Line<'static>> {
    rows.iter()
        .zip(heights)
        .enumerate()
        .flat_map(|(index, (row, height))| {
            let style = Style::default().fg(theme.fg0).bg(theme.row_bg(index));
            cell_lines(row, widths, *height, style)
        })
        .collect()
}

/// `height` lines starting at `start`, wrapping around the end so the list
/// loops without a gap
pub fn visible_window(lines: &[Line<'static>], start: u32, height: u16) -> Vec<Line<'static>> {
    if lines.is_empty() {
        return Vec::new();
    }

    (0..height as usize)
        .map(|offset| lines[(start as usize + offset) % lines.len()].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_fit_cell() {
        assert_eq!(fit_cell("abc", 5), "abc  ");
        assert_eq!(fit_cell("abcdef", 4), "abcd");
        // wide characters are not split
        assert_eq!(fit_cell("日本", 3), "日 ");
        assert_eq!(fit_cell("x", 0), "");
    }

    #[test]
    fn test_column_widths() {
        let widths = column_widths(&ColumnWidths::Auto, 2, 21);
        assert_eq!(widths, vec![10, 10]);

        let widths = column_widths(
            &ColumnWidths::Each(vec![ColumnWidth::Length(4)]),
            2,
            21,
        );
        assert_eq!(widths, vec![4, 16]);

        assert!(column_widths(&ColumnWidths::Even, 0, 10).is_empty());
    }

    #[test]
    fn test_body_lines_follow_row_heights() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c\nd".to_string(), "e".to_string()],
        ];
        let lines = body_lines(&rows, &[1, 2], &[2, 2], &Theme::default());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text, vec!["a  b ", "c  e ", "d    "]);
    }

    #[test]
    fn test_visible_window_wraps() {
        let lines: Vec<Line<'static>> = ["0", "1", "2"].iter().map(|s| Line::raw(*s)).collect();
        let window = visible_window(&lines, 2, 4);
        let text: Vec<String> = window.iter().map(line_text).collect();
        assert_eq!(text, vec!["2", "0", "1", "2"]);
        assert!(visible_window(&[], 0, 3).is_empty());
    }
}
