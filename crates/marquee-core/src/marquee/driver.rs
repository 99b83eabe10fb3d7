//! Marquee driver: the auto-scroll state machine
//!
//! Combines the distance policy, the cadence clock and the row animation.
//! The host owns the driver and calls [`MarqueeDriver::tick`] from its event
//! loop with the time elapsed since the previous call.

use std::time::Duration;

use super::animation::{AnimationStep, RowAnimation};
use super::config::{MarqueeConfig, MarqueeConfigExt};
use super::timing::Interval;
use crate::distance::{next_counter, resolve, DistanceConfig, DistanceMode, RowGeometry};

/// The list widget a driver scrolls
///
/// Either part may be missing while the host is laying out or tearing down;
/// the driver then skips the tick.
pub trait MarqueeHost {
    /// Current row layout, if rows are rendered
    fn geometry(&self) -> Option<&RowGeometry>;

    /// Current scroll position, if the scroll surface exists
    fn scroll_top(&self) -> Option<u32>;

    fn set_scroll_top(&mut self, top: u32);
}

/// Parameters for starting the marquee
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub distance: DistanceConfig,
    pub speed: Duration,
    /// Jump to a specific row. Not supported; a request carrying a nonzero
    /// index is ignored. Row 0 counts as no jump.
    pub row_index: Option<usize>,
}

impl ScrollRequest {
    pub fn from_config(config: &MarqueeConfig) -> Self {
        Self {
            distance: config.distance,
            speed: config.speed(),
            row_index: None,
        }
    }

    /// The requested row jump, if any
    pub fn row_jump(&self) -> Option<usize> {
        self.row_index.filter(|&index| index > 0)
    }
}

#[derive(Debug, Clone)]
struct Running {
    distance: DistanceConfig,
    /// Outer cadence, one scroll step per period
    cadence: Interval,
    /// In-flight row step, advanced once per tick
    animation: Option<RowAnimation>,
}

#[derive(Debug, Clone, Default)]
enum DriverState {
    #[default]
    Idle,
    Running(Running),
}

/// Auto-scroll state machine
#[derive(Debug, Clone)]
pub struct MarqueeDriver {
    state: DriverState,
    /// Index of the current row step, only used in row mode
    counter: usize,
    /// Cells moved per frame while stepping rows
    row_step: u32,
}

impl Default for MarqueeDriver {
    fn default() -> Self {
        Self::new(MarqueeConfig::default().row_step)
    }
}

impl MarqueeDriver {
    pub fn new(row_step: u32) -> Self {
        Self {
            state: DriverState::Idle,
            counter: 0,
            row_step,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running(_))
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            DriverState::Running(Running {
                animation: Some(_),
                ..
            })
        )
    }

    #[inline]
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Start scrolling. Restarting replaces the cadence and drops any
    /// in-flight row step; the row counter is kept.
    pub fn start(&mut self, request: ScrollRequest) {
        if let Some(row_index) = request.row_jump() {
            tracing::warn!(row_index, "Scrolling to a row index is not supported");
            return;
        }

        tracing::debug!(
            distance = %request.distance,
            speed_ms = request.speed.as_millis() as u64,
            "Marquee started"
        );
        self.state = DriverState::Running(Running {
            distance: request.distance,
            cadence: Interval::new(request.speed),
            animation: None,
        });
    }

    /// Stop scrolling. Safe to call when already idle.
    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::debug!("Marquee stopped");
        }
        self.state = DriverState::Idle;
    }

    /// Stop and forget the row counter
    pub fn reset(&mut self) {
        self.stop();
        self.counter = 0;
    }

    /// Advance the marquee by `elapsed` time.
    pub fn tick<H>(&mut self, elapsed: Duration, host: &mut H)
    where
        H: MarqueeHost + ?Sized,
    {
        let row_step = self.row_step;
        let DriverState::Running(running) = &mut self.state else {
            return;
        };

        // Row animation first: a step armed below only starts moving next tick
        if let Some(animation) = running.animation {
            let row_count = host.geometry().map(RowGeometry::row_count);
            if let (Some(row_count), Some(top)) = (row_count, host.scroll_top()) {
                match animation.advance(top) {
                    AnimationStep::Moved(next) => host.set_scroll_top(next),
                    AnimationStep::Arrived => {
                        let step = match running.distance.mode() {
                            DistanceMode::Rows(step) => step,
                            _ => 1,
                        };
                        self.counter = next_counter(self.counter, row_count, step);
                        running.animation = None;
                    }
                }
            }
        }

        if !running.cadence.advance(elapsed) {
            return;
        }

        let (delta, client_height) = match (host.geometry(), host.scroll_top()) {
            (Some(geometry), Some(_)) => (
                resolve(running.distance, geometry, self.counter),
                geometry.client_height(),
            ),
            _ => {
                tracing::trace!("Marquee step skipped, list not laid out");
                return;
            }
        };

        if running.distance.is_row_mode() {
            running.animation = Some(RowAnimation::new(delta, row_step));
        } else if let Some(top) = host.scroll_top() {
            host.set_scroll_top(top.saturating_add(delta));
        }

        // A full cycle has scrolled past: loop back to the top
        if let Some(top) = host.scroll_top() {
            if client_height <= top {
                tracing::debug!(top, client_height, "Marquee cycle restarted");
                host.set_scroll_top(0);
            }
        }
    }
}
