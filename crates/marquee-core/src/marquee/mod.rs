//! Auto-scroll ("marquee") engine for list widgets
//!
//! # Layout
//!
//! - `timing` - Cadence clock and stepping helpers
//! - `config` - Timing helpers on top of [`MarqueeConfig`]
//! - `animation` - Row stepping animation
//! - `driver` - State machine combining the above with the distance policy
//!
//! # Usage
//!
//! ```ignore
//! use marquee_core::marquee::{MarqueeDriver, ScrollRequest};
//!
//! let mut driver = MarqueeDriver::new(config.row_step);
//! driver.start(ScrollRequest::from_config(&config));
//!
//! // In the host's event loop
//! driver.tick(elapsed, &mut viewport);
//! ```

pub mod animation;
pub mod config;
pub mod driver;
pub mod timing;

pub use animation::{AnimationStep, RowAnimation};
pub use config::{MarqueeConfig, MarqueeConfigExt};
pub use driver::{MarqueeDriver, MarqueeHost, ScrollRequest};
pub use timing::Interval;
