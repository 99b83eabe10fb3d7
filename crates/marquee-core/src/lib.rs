pub mod config;
pub mod data;
pub mod distance;
pub mod error;
pub mod layout;
pub mod marquee;

pub use config::{AppConfig, MarqueeConfig};
pub use distance::{resolve, DistanceConfig, RowGeometry};
pub use error::{Error, Result};
pub use marquee::{MarqueeDriver, MarqueeHost, ScrollRequest};
