use std::sync::Arc;
use std::time::Duration;

use marquee_core::data::TableData;
use marquee_core::layout::{parse_col_widths, ColumnWidths};
use marquee_core::marquee::{MarqueeConfigExt, MarqueeDriver, MarqueeHost, ScrollRequest};
use marquee_core::{AppConfig, RowGeometry};

use crate::theme::Theme;

/// Scroll surface and measured rows of the list body
///
/// Both parts stay `None` until the first layout pass.
#[derive(Debug, Clone, Default)]
pub struct ListViewport {
    geometry: Option<RowGeometry>,
    scroll_top: Option<u32>,
}

impl ListViewport {
    /// Measure rows, keeping the scroll position within the content
    pub fn layout(&mut self, row_heights: &[u32]) {
        self.geometry = Some(RowGeometry::from_heights(row_heights.iter().copied()));
        let limit = self.content_height();
        self.scroll_top = Some(self.scroll_top.unwrap_or(0).min(limit));
    }

    /// Total height of one pass over all rows
    pub fn content_height(&self) -> u32 {
        self.geometry
            .as_ref()
            .map(RowGeometry::client_height)
            .unwrap_or(0)
    }

    pub fn position(&self) -> u32 {
        self.scroll_top.unwrap_or(0)
    }

    pub fn rewind(&mut self) {
        if self.scroll_top.is_some() {
            self.scroll_top = Some(0);
        }
    }
}

impl MarqueeHost for ListViewport {
    fn geometry(&self) -> Option<&RowGeometry> {
        self.geometry.as_ref()
    }

    fn scroll_top(&self) -> Option<u32> {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: u32) {
        if self.scroll_top.is_some() {
            self.scroll_top = Some(top);
        }
    }
}

/// Main application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub data: TableData,
    pub columns: ColumnWidths,
    pub viewport: ListViewport,
    pub driver: MarqueeDriver,
    pub should_quit: bool,
    pub paused: bool,
    pub status_message: Option<String>,
    /// Height in lines of each body row
    row_heights: Vec<u32>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, data: TableData, theme: Theme) -> Self {
        let row_heights = data.rows.iter().map(|row| row_height(row)).collect();
        let columns = parse_col_widths(&config.list.col_width);
        let driver = MarqueeDriver::new(config.marquee.row_step);

        let mut app = Self {
            config,
            theme,
            data,
            columns,
            viewport: ListViewport::default(),
            driver,
            should_quit: false,
            paused: false,
            status_message: None,
            row_heights,
        };

        if app.config.marquee.is_active() {
            app.scroll_to(ScrollRequest::from_config(&app.config.marquee));
        } else {
            tracing::info!(
                enabled = app.config.marquee.enabled,
                distance = %app.config.marquee.distance,
                "Marquee inactive"
            );
            app.paused = true;
        }
        app
    }

    pub fn row_heights(&self) -> &[u32] {
        &self.row_heights
    }

    /// Start the marquee with an explicit request
    pub fn scroll_to(&mut self, request: ScrollRequest) {
        if request.row_jump().is_some() {
            self.status_message = Some("Scrolling to a row is not supported".to_string());
        }
        self.driver.start(request);
        self.paused = !self.driver.is_running();
    }

    pub fn toggle_pause(&mut self) {
        if self.driver.is_running() {
            self.driver.stop();
            self.paused = true;
            tracing::info!(position = self.viewport.position(), "Marquee paused");
        } else {
            self.resume();
        }
    }

    /// Back to the first row and start over
    pub fn restart(&mut self) {
        tracing::info!("Marquee restarted");
        self.driver.reset();
        self.viewport.rewind();
        self.resume();
    }

    /// Start from the configured request unless the marquee is switched off
    fn resume(&mut self) {
        if self.config.marquee.is_active() {
            self.scroll_to(ScrollRequest::from_config(&self.config.marquee));
        } else {
            self.paused = true;
            self.status_message = Some("Marquee is disabled in the configuration".to_string());
        }
    }

    /// Re-measure rows after a layout pass
    pub fn layout_rows(&mut self) {
        self.viewport.layout(&self.row_heights);
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.driver.tick(elapsed, &mut self.viewport);
    }

    /// Whether the event loop should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.driver.is_running()
    }
}

/// Lines needed by the tallest cell of a row
pub fn row_height(row: &[String]) -> u32 {
    row.iter()
        .map(|cell| cell.lines().count().max(1))
        .max()
        .unwrap_or(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{DistanceConfig, MarqueeConfig};

    fn table(rows: usize) -> TableData {
        TableData {
            header: Some(vec!["name".to_string()]),
            rows: (0..rows).map(|i| vec![format!("row {}", i)]).collect(),
        }
    }

    fn app_with(marquee: MarqueeConfig, rows: usize) -> App {
        let config = AppConfig {
            marquee,
            ..Default::default()
        };
        App::new(Arc::new(config), table(rows), Theme::default())
    }

    #[test]
    fn test_row_height_counts_lines() {
        assert_eq!(row_height(&["a".to_string(), "b\nc\nd".to_string()]), 3);
        assert_eq!(row_height(&[String::new()]), 1);
        assert_eq!(row_height(&[]), 1);
    }

    #[test]
    fn test_starts_running_when_enabled() {
        let app = app_with(MarqueeConfig::default(), 5);
        assert!(app.driver.is_running());
        assert!(!app.paused);

        let app = app_with(
            MarqueeConfig {
                enabled: false,
                ..Default::default()
            },
            5,
        );
        assert!(!app.driver.is_running());
        assert!(app.paused);
    }

    #[test]
    fn test_zero_distance_stays_paused() {
        let mut app = app_with(
            MarqueeConfig {
                distance: DistanceConfig::Number(0.0),
                speed_ms: 10,
                ..Default::default()
            },
            5,
        );
        assert!(!app.driver.is_running());
        assert!(app.paused);
        assert!(!app.needs_fast_update());

        app.toggle_pause();
        assert!(app.paused);
        assert!(!app.driver.is_running());
        assert!(app.status_message.is_some());

        app.status_message = None;
        app.restart();
        assert!(app.paused);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_row_index_zero_scrolls_normally() {
        let mut app = app_with(MarqueeConfig::default(), 5);
        app.driver.stop();
        app.scroll_to(ScrollRequest {
            row_index: Some(0),
            ..ScrollRequest::from_config(&MarqueeConfig::default())
        });
        assert!(app.status_message.is_none());
        assert!(!app.paused);
        assert!(app.driver.is_running());
    }

    #[test]
    fn test_tick_before_layout_is_noop() {
        let mut app = app_with(
            MarqueeConfig {
                distance: DistanceConfig::Number(2.0),
                speed_ms: 10,
                ..Default::default()
            },
            5,
        );
        app.on_tick(Duration::from_millis(10));
        assert_eq!(app.viewport.scroll_top(), None);
    }

    #[test]
    fn test_pixel_marquee_scrolls_and_loops() {
        let mut app = app_with(
            MarqueeConfig {
                distance: DistanceConfig::Number(2.0),
                speed_ms: 10,
                ..Default::default()
            },
            3,
        );
        app.layout_rows();
        app.on_tick(Duration::from_millis(10));
        assert_eq!(app.viewport.position(), 2);
        // content height 3: next step reaches 4 and loops
        app.on_tick(Duration::from_millis(10));
        assert_eq!(app.viewport.position(), 0);
    }

    #[test]
    fn test_toggle_pause_and_restart() {
        let mut app = app_with(
            MarqueeConfig {
                distance: DistanceConfig::Number(1.0),
                speed_ms: 10,
                ..Default::default()
            },
            5,
        );
        app.layout_rows();
        app.on_tick(Duration::from_millis(10));
        assert_eq!(app.viewport.position(), 1);

        app.toggle_pause();
        assert!(app.paused);
        app.on_tick(Duration::from_millis(10));
        assert_eq!(app.viewport.position(), 1);

        app.toggle_pause();
        assert!(!app.paused);

        app.restart();
        assert_eq!(app.viewport.position(), 0);
        assert!(app.driver.is_running());
    }

    #[test]
    fn test_row_index_request_reports_status() {
        let mut app = app_with(MarqueeConfig::default(), 5);
        app.driver.stop();
        app.scroll_to(ScrollRequest {
            row_index: Some(2),
            ..ScrollRequest::from_config(&MarqueeConfig::default())
        });
        assert!(app.status_message.is_some());
        assert!(app.paused);
    }

    #[test]
    fn test_layout_clamps_scroll_position() {
        let mut viewport = ListViewport::default();
        viewport.layout(&[1, 1, 1, 1]);
        viewport.set_scroll_top(4);
        viewport.layout(&[1, 1]);
        assert_eq!(viewport.position(), 2);

        let mut unlaid = ListViewport::default();
        unlaid.set_scroll_top(1);
        assert_eq!(unlaid.scroll_top(), None);
    }
}
