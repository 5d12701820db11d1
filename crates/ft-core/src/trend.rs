//! Directional trend classification between two adjacent periods.

use serde::{Deserialize, Serialize};

/// Direction of change between a current and a previous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Classifies the change from `previous` to `current`.
///
/// Total over all pairs; exact comparison with no tolerance, so
/// `trend(a, a)` is always [`TrendDirection::Flat`].
pub fn trend<T: Ord>(current: T, previous: T) -> TrendDirection {
    match current.cmp(&previous) {
        std::cmp::Ordering::Greater => TrendDirection::Up,
        std::cmp::Ordering::Less => TrendDirection::Down,
        std::cmp::Ordering::Equal => TrendDirection::Flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_all_directions() {
        assert_eq!(trend(80_u64, 60), TrendDirection::Up);
        assert_eq!(trend(60_u64, 80), TrendDirection::Down);
        assert_eq!(trend(60_u64, 60), TrendDirection::Flat);
    }

    #[test]
    fn equal_values_are_flat_everywhere() {
        for value in [0_u32, 1, 7, 1_000_000] {
            assert_eq!(trend(value, value), TrendDirection::Flat);
        }
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&TrendDirection::Flat).unwrap(),
            "\"flat\""
        );
    }
}
