//! Timing helpers derived from [`MarqueeConfig`]

use std::time::Duration;

pub use crate::config::MarqueeConfig;
use crate::distance::DistanceMode;

/// Extension trait for MarqueeConfig with utility methods
pub trait MarqueeConfigExt {
    /// Period between scroll steps
    fn speed(&self) -> Duration;

    /// Tick duration for the row stepping animation
    fn animation_tick_duration(&self) -> Duration;

    /// Check if the marquee would actually move when started
    fn is_active(&self) -> bool;
}

impl MarqueeConfigExt for MarqueeConfig {
    #[inline]
    fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.enabled && self.distance.mode() != DistanceMode::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceConfig;

    #[test]
    fn test_speed() {
        let config = MarqueeConfig {
            speed_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.speed(), Duration::from_millis(250));
    }

    #[test]
    fn test_animation_tick_fallback() {
        let config = MarqueeConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        let config = MarqueeConfig {
            animation_fps: 50,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_is_active() {
        let mut config = MarqueeConfig::default();
        assert!(config.is_active());

        config.distance = DistanceConfig::Number(0.0);
        assert!(!config.is_active());

        config.distance = DistanceConfig::Invalid;
        assert!(!config.is_active());

        config.distance = DistanceConfig::Number(4.0);
        config.enabled = false;
        assert!(!config.is_active());
    }
}
