//! Deterministic contribution heatmap for GitHub cards.
//!
//! The pattern is decorative. It is derived from the widget id so a card
//! looks the same on every render without any network access.

/// Days in the generated history.
pub const HEATMAP_DAYS: usize = 365;

/// Weeks shown on a full-size card.
pub const HEATMAP_WEEKS: usize = 52;

/// Weeks shown on a preview card.
pub const PREVIEW_WEEKS: usize = 10;

/// Highest activity level.
pub const MAX_LEVEL: u8 = 4;

fn seed(id: &str) -> u64 {
    id.encode_utf16().map(u64::from).sum()
}

fn level(percent: u64) -> u8 {
    match percent {
        0..=59 => 0,
        60..=79 => 1,
        80..=89 => 2,
        90..=94 => 3,
        _ => MAX_LEVEL,
    }
}

/// Activity level (0..=4) for each of the last [`HEATMAP_DAYS`] days.
#[must_use]
pub fn contribution_levels(id: &str) -> Vec<u8> {
    let seed = seed(id);
    (1..=HEATMAP_DAYS as u64)
        .map(|day| level(seed.wrapping_mul(day) % 100))
        .collect()
}

/// Levels grouped into 7-day columns, keeping the last [`HEATMAP_WEEKS`].
#[must_use]
pub fn contribution_weeks(id: &str) -> Vec<Vec<u8>> {
    let weeks: Vec<Vec<u8>> = contribution_levels(id)
        .chunks(7)
        .map(<[u8]>::to_vec)
        .collect();
    let skip = weeks.len().saturating_sub(HEATMAP_WEEKS);
    weeks.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_seed() {
        // "a" = 97: day 1 -> 97 (4), day 2 -> 94 (3), day 3 -> 91 (3), day 4 -> 88 (2)
        let levels = contribution_levels("a");
        assert_eq!(&levels[..4], &[4, 3, 3, 2]);
    }

    #[test]
    fn test_zero_seed_is_quiet() {
        assert!(contribution_levels("").iter().all(|&l| l == 0));
    }

    #[test]
    fn test_week_grouping() {
        let weeks = contribution_weeks("widget-1");
        assert_eq!(weeks.len(), HEATMAP_WEEKS);
        // 365 days = 52 full weeks + 1 day; the oldest full week is dropped
        assert_eq!(weeks.last().map(Vec::len), Some(1));
        assert!(weeks[..HEATMAP_WEEKS - 1].iter().all(|w| w.len() == 7));
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_bounded(id in "[a-zA-Z0-9-]{1,36}") {
            let first = contribution_levels(&id);
            prop_assert_eq!(first.len(), HEATMAP_DAYS);
            prop_assert!(first.iter().all(|&l| l <= MAX_LEVEL));
            prop_assert_eq!(first, contribution_levels(&id));
        }
    }
}
