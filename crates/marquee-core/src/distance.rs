//! Scroll distance policy
//!
//! Turns the configured `distance` into the number of cells the marquee
//! should advance on its next step. Positive values scroll a fixed amount,
//! negative values step whole rows, zero and non-numeric values disable
//! scrolling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configured scroll distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceConfig {
    /// Signed amount: cells when positive, rows when negative
    Number(f64),
    /// Anything that is not a number
    Invalid,
}

/// How a distance is interpreted for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Scrolling does not advance
    Disabled,
    /// Fixed number of cells per step
    Pixels(u32),
    /// Whole rows per step
    Rows(usize),
}

impl DistanceConfig {
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self::Invalid
        } else {
            Self::Number(value)
        }
    }

    /// Parse a user supplied string; anything non-numeric is `Invalid`
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<f64>()
            .map(Self::from_f64)
            .unwrap_or(Self::Invalid)
    }

    pub fn mode(&self) -> DistanceMode {
        match *self {
            Self::Number(v) if v > 0.0 => DistanceMode::Pixels(v.ceil() as u32),
            // -1.5 rounds toward negative infinity, i.e. two rows
            Self::Number(v) if v < 0.0 => DistanceMode::Rows((-v).ceil() as usize),
            _ => DistanceMode::Disabled,
        }
    }

    #[inline]
    pub fn is_row_mode(&self) -> bool {
        matches!(self.mode(), DistanceMode::Rows(_))
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self::Number(-1.0)
    }
}

impl From<f64> for DistanceConfig {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for DistanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Invalid => f.write_str("off"),
        }
    }
}

impl Serialize for DistanceConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Self::Number(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(v as i64)
            }
            Self::Number(v) => serializer.serialize_f64(v),
            Self::Invalid => serializer.serialize_str("off"),
        }
    }
}

// Accept integers, floats or strings; strings that are not numbers disable scrolling
impl<'de> Deserialize<'de> for DistanceConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DistanceVisitor;

        impl<'de> Visitor<'de> for DistanceVisitor {
            type Value = DistanceConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<DistanceConfig, E>
            where
                E: de::Error,
            {
                Ok(DistanceConfig::from_f64(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<DistanceConfig, E>
            where
                E: de::Error,
            {
                Ok(DistanceConfig::from_f64(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<DistanceConfig, E>
            where
                E: de::Error,
            {
                Ok(DistanceConfig::from_f64(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<DistanceConfig, E>
            where
                E: de::Error,
            {
                Ok(DistanceConfig::parse(value))
            }

            fn visit_bool<E>(self, _value: bool) -> Result<DistanceConfig, E>
            where
                E: de::Error,
            {
                Ok(DistanceConfig::Invalid)
            }
        }

        deserializer.deserialize_any(DistanceVisitor)
    }
}

/// Live row layout of a list, measured in terminal cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowGeometry {
    /// Distance from the container top to each row's top edge
    offsets: Vec<u32>,
    /// Full rendered height of the row container
    offset_height: u32,
    /// Content height used to detect a finished cycle
    client_height: u32,
}

impl RowGeometry {
    pub fn new(offsets: Vec<u32>, offset_height: u32, client_height: u32) -> Self {
        Self {
            offsets,
            offset_height,
            client_height,
        }
    }

    /// Build geometry from stacked row heights with no gaps between rows
    pub fn from_heights<I>(heights: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut offsets = Vec::new();
        let mut total: u32 = 0;
        for height in heights {
            offsets.push(total);
            total = total.saturating_add(height);
        }
        Self::new(offsets, total, total)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn row_offset(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).copied()
    }

    #[inline]
    pub fn offset_height(&self) -> u32 {
        self.offset_height
    }

    #[inline]
    pub fn client_height(&self) -> u32 {
        self.client_height
    }
}

/// Compute the scroll delta for the next marquee step.
///
/// In row mode the result is measured from the first row, so it is the
/// absolute scroll position the step should reach. Once the target row runs
/// past the end of the list the whole container height is returned, which
/// sends the viewport to the end of the cycle.
pub fn resolve(distance: DistanceConfig, rows: &RowGeometry, counter: usize) -> u32 {
    match distance.mode() {
        DistanceMode::Disabled => 0,
        DistanceMode::Pixels(cells) => cells,
        DistanceMode::Rows(step) => {
            let target = counter.saturating_add(1).saturating_mul(step);
            match (rows.row_offset(target), rows.row_offset(0)) {
                (Some(to), Some(first)) => to.saturating_sub(first),
                _ => rows.offset_height(),
            }
        }
    }
}

/// Advance a row counter by one, wrapping to 0 past the last reachable step
pub fn next_counter(counter: usize, row_count: usize, step: usize) -> usize {
    let next = counter + 1;
    let capacity = (row_count as f64 - 1.0) / step.max(1) as f64;
    if next as f64 > capacity {
        0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_rows() -> RowGeometry {
        // Offset by 2 to make sure deltas are taken relative to the first row
        RowGeometry::new((0..10).map(|i| 2 + i * 3).collect(), 40, 30)
    }

    #[test]
    fn test_invalid_distance_is_zero() {
        let rows = ten_rows();
        assert_eq!(resolve(DistanceConfig::Invalid, &rows, 0), 0);
        assert_eq!(resolve(DistanceConfig::parse("fast"), &rows, 3), 0);
        assert_eq!(resolve(DistanceConfig::from_f64(f64::NAN), &rows, 1), 0);
    }

    #[test]
    fn test_zero_distance_is_zero() {
        assert_eq!(resolve(DistanceConfig::Number(0.0), &ten_rows(), 0), 0);
    }

    #[test]
    fn test_positive_distance_rounds_up() {
        let rows = ten_rows();
        assert_eq!(resolve(DistanceConfig::Number(5.0), &rows, 0), 5);
        assert_eq!(resolve(DistanceConfig::Number(2.1), &rows, 7), 3);
        assert_eq!(resolve(DistanceConfig::Number(0.2), &RowGeometry::default(), 0), 1);
    }

    #[test]
    fn test_row_mode_targets_row_offset() {
        let rows = ten_rows();
        // target row 2: offset 8 minus first row offset 2
        assert_eq!(resolve(DistanceConfig::Number(-2.0), &rows, 0), 6);
        assert_eq!(resolve(DistanceConfig::Number(-2.0), &rows, 3), 24);
    }

    #[test]
    fn test_row_mode_past_end_returns_container_height() {
        let rows = RowGeometry::new(vec![0, 4, 8, 12], 16, 16);
        // target row 6 > 3
        assert_eq!(resolve(DistanceConfig::Number(-2.0), &rows, 2), 16);
        assert_eq!(resolve(DistanceConfig::Number(-1.0), &RowGeometry::default(), 0), 0);
    }

    #[test]
    fn test_negative_fraction_steps_more_rows() {
        assert_eq!(DistanceConfig::Number(-1.5).mode(), DistanceMode::Rows(2));
        assert_eq!(DistanceConfig::Number(-0.4).mode(), DistanceMode::Rows(1));
    }

    #[test]
    fn test_counter_wraps() {
        // 10 rows, 2 per step: capacity 4.5
        assert_eq!(next_counter(3, 10, 2), 4);
        assert_eq!(next_counter(4, 10, 2), 0);
        // 4 rows, 1 per step: capacity 3
        assert_eq!(next_counter(2, 4, 1), 3);
        assert_eq!(next_counter(3, 4, 1), 0);
        assert_eq!(next_counter(0, 0, 1), 0);
    }

    #[test]
    fn test_geometry_from_heights() {
        let rows = RowGeometry::from_heights([1, 2, 3]);
        assert_eq!(rows.row_count(), 3);
        assert_eq!(rows.row_offset(2), Some(3));
        assert_eq!(rows.offset_height(), 6);
        assert_eq!(rows.client_height(), 6);
    }

    #[test]
    fn test_deserialize_distance() {
        #[derive(Deserialize)]
        struct Wrapper {
            distance: DistanceConfig,
        }

        let w: Wrapper = toml::from_str("distance = -2").unwrap();
        assert_eq!(w.distance, DistanceConfig::Number(-2.0));
        let w: Wrapper = toml::from_str("distance = 1.5").unwrap();
        assert_eq!(w.distance, DistanceConfig::Number(1.5));
        let w: Wrapper = toml::from_str("distance = \"30\"").unwrap();
        assert_eq!(w.distance, DistanceConfig::Number(30.0));
        let w: Wrapper = toml::from_str("distance = \"auto\"").unwrap();
        assert_eq!(w.distance, DistanceConfig::Invalid);
    }
}
