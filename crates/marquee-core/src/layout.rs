//! List layout helpers: visible scroll height and column widths

use serde::{Deserialize, Serialize};

use crate::config::ListConfig;

/// One entry of a column width list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidthValue {
    Number(f64),
    Text(String),
}

/// Column widths as written in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidthSpec {
    /// Comma separated widths, or `"avg"`
    Text(String),
    List(Vec<WidthValue>),
}

impl Default for ColumnWidthSpec {
    fn default() -> Self {
        Self::Text("auto".to_string())
    }
}

/// Width of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Share the remaining space
    Auto,
    /// Fixed number of cells
    Length(u16),
    /// Percentage of the list width
    Percent(u16),
}

/// Parsed column widths for a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnWidths {
    /// Every column sizes itself
    Auto,
    /// Every column gets the same share
    Even,
    /// Widths by column position; missing entries are `Auto`
    Each(Vec<ColumnWidth>),
}

impl ColumnWidths {
    /// Width for the column at `index`
    pub fn get(&self, index: usize) -> ColumnWidth {
        match self {
            Self::Each(widths) => widths.get(index).copied().unwrap_or(ColumnWidth::Auto),
            Self::Auto | Self::Even => ColumnWidth::Auto,
        }
    }
}

/// Height available to scrolled rows, after the header
pub fn scroll_height(list: &ListConfig, area_height: u16) -> u16 {
    let total = if list.height == 0 {
        area_height
    } else {
        list.height.min(area_height)
    };

    if list.header.show {
        total.saturating_sub(list.header.height)
    } else {
        total
    }
}

pub fn parse_col_widths(spec: &ColumnWidthSpec) -> ColumnWidths {
    match spec {
        ColumnWidthSpec::List(values) => {
            ColumnWidths::Each(values.iter().map(parse_width_value).collect())
        }
        ColumnWidthSpec::Text(text) if text.contains(',') => {
            ColumnWidths::Each(text.split(',').map(parse_width).collect())
        }
        ColumnWidthSpec::Text(text) if text.trim() == "avg" => ColumnWidths::Even,
        ColumnWidthSpec::Text(_) => ColumnWidths::Auto,
    }
}

fn parse_width_value(value: &WidthValue) -> ColumnWidth {
    match value {
        WidthValue::Number(n) => length(*n),
        WidthValue::Text(text) => parse_width(text),
    }
}

/// Parse one width: `"12px"`, `"30%"`, `"12"`, anything else is `Auto`
pub fn parse_width(text: &str) -> ColumnWidth {
    let text = text.trim();
    if text.contains("px") {
        leading_number(text).map(length).unwrap_or(ColumnWidth::Auto)
    } else if text.contains('%') {
        leading_number(text)
            .filter(|n| *n > 0.0)
            .map(|n| ColumnWidth::Percent(n.round().clamp(1.0, 100.0) as u16))
            .unwrap_or(ColumnWidth::Auto)
    } else {
        text.parse::<f64>().map(length).unwrap_or(ColumnWidth::Auto)
    }
}

/// Positive widths below half a cell still get one cell
fn length(n: f64) -> ColumnWidth {
    if n.is_nan() || n <= 0.0 {
        ColumnWidth::Auto
    } else {
        ColumnWidth::Length(n.round().clamp(1.0, u16::MAX as f64) as u16)
    }
}

/// Longest numeric prefix of `text`, e.g. `12.5` for `"12.5px"`
fn leading_number(text: &str) -> Option<f64> {
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderConfig;

    #[test]
    fn test_scroll_height_with_header() {
        let mut list = ListConfig {
            height: 20,
            ..Default::default()
        };
        assert_eq!(scroll_height(&list, 40), 19);

        list.header = HeaderConfig {
            show: true,
            height: 3,
        };
        assert_eq!(scroll_height(&list, 10), 7);

        list.header.show = false;
        assert_eq!(scroll_height(&list, 40), 20);
    }

    #[test]
    fn test_scroll_height_fills_area() {
        let list = ListConfig::default();
        assert_eq!(scroll_height(&list, 30), 29);
        assert_eq!(scroll_height(&list, 0), 0);
    }

    #[test]
    fn test_comma_separated_widths() {
        let spec = ColumnWidthSpec::Text("12px, 30%,8,auto,0".to_string());
        assert_eq!(
            parse_col_widths(&spec),
            ColumnWidths::Each(vec![
                ColumnWidth::Length(12),
                ColumnWidth::Percent(30),
                ColumnWidth::Length(8),
                ColumnWidth::Auto,
                ColumnWidth::Auto,
            ])
        );
    }

    #[test]
    fn test_tiny_widths_keep_one_cell() {
        let spec = ColumnWidthSpec::Text("0.3px,0.2,0.4%".to_string());
        assert_eq!(
            parse_col_widths(&spec),
            ColumnWidths::Each(vec![
                ColumnWidth::Length(1),
                ColumnWidth::Length(1),
                ColumnWidth::Percent(1),
            ])
        );
        assert_eq!(
            parse_width_value(&WidthValue::Number(0.1)),
            ColumnWidth::Length(1)
        );
    }

    #[test]
    fn test_avg_and_single_values() {
        assert_eq!(
            parse_col_widths(&ColumnWidthSpec::Text("avg".to_string())),
            ColumnWidths::Even
        );
        assert_eq!(
            parse_col_widths(&ColumnWidthSpec::Text("20px".to_string())),
            ColumnWidths::Auto
        );
        assert_eq!(parse_col_widths(&ColumnWidthSpec::default()), ColumnWidths::Auto);
    }

    #[test]
    fn test_list_widths() {
        let spec = ColumnWidthSpec::List(vec![
            WidthValue::Number(10.0),
            WidthValue::Text(String::new()),
            WidthValue::Text("25%".to_string()),
        ]);
        let widths = parse_col_widths(&spec);
        assert_eq!(widths.get(0), ColumnWidth::Length(10));
        assert_eq!(widths.get(1), ColumnWidth::Auto);
        assert_eq!(widths.get(2), ColumnWidth::Percent(25));
        assert_eq!(widths.get(7), ColumnWidth::Auto);
    }

    #[test]
    fn test_deserialize_spec() {
        #[derive(Deserialize)]
        struct Wrapper {
            col_width: ColumnWidthSpec,
        }

        let w: Wrapper = toml::from_str("col_width = [6, \"40%\"]").unwrap();
        assert_eq!(
            parse_col_widths(&w.col_width),
            ColumnWidths::Each(vec![ColumnWidth::Length(6), ColumnWidth::Percent(40)])
        );
    }
}
