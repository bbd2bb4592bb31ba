//! Per-category metrics over a window of games.
//!
//! Shooting percentages pool the window's makes and attempts
//! (`sum(made) / sum(attempted)`), so a 1-for-1 night does not weigh as much as
//! a 6-for-12 one. A category with no attempts in the whole window yields `0.0`.
//! Count stats are per-game means.

use regimen_core::{GameStatRecord, StatKey, StatVector};
use regimen_stats::{descriptive::DescriptiveStats, ratio};

#[derive(Debug, Default, Clone, Copy)]
struct ShootingTotals {
    made: u64,
    attempted: u64,
}

impl ShootingTotals {
    fn add(&mut self, made: u32, attempted: u32) {
        self.made += u64::from(made);
        self.attempted += u64::from(attempted);
    }

    fn percentage(self) -> f32 {
        ratio::ratio(self.made, self.attempted)
    }
}

/// Made and attempted shots of a percentage category.
fn shots(game: &GameStatRecord, stat: StatKey) -> (u32, u32) {
    match stat {
        StatKey::FieldGoalPct => (game.fg_made, game.fg_attempted),
        StatKey::TwoPointPct => (game.two_made, game.two_attempted),
        StatKey::ThreePointPct => (game.three_made, game.three_attempted),
        StatKey::FreeThrowPct => (game.ft_made, game.ft_attempted),
        _ => (0, 0),
    }
}

/// Single-game value of a count category.
fn count(game: &GameStatRecord, stat: StatKey) -> u64 {
    match stat {
        StatKey::Rebounds => game.rebounds(),
        StatKey::Assists => game.assists.into(),
        StatKey::Steals => game.steals.into(),
        StatKey::Blocks => game.blocks.into(),
        StatKey::Turnovers => game.turnovers.into(),
        StatKey::Points => game.points.into(),
        _ => 0,
    }
}

fn pooled_percentage(games: &[&GameStatRecord], stat: StatKey) -> f32 {
    let mut totals = ShootingTotals::default();
    for game in games {
        let (made, attempted) = shots(game, stat);
        totals.add(made, attempted);
    }
    totals.percentage()
}

#[expect(clippy::cast_precision_loss)]
fn per_game_mean(games: &[&GameStatRecord], stat: StatKey) -> f32 {
    DescriptiveStats::mean_or_zero(games.iter().map(|game| count(game, stat) as f32))
}

/// Computes the metric for every category over `games`.
///
/// Returns `None` when `games` is empty.
#[must_use]
pub fn compute_metrics(games: &[&GameStatRecord]) -> Option<StatVector> {
    if games.is_empty() {
        return None;
    }
    let metrics = StatVector::from_fn(|stat| {
        if stat.is_percentage() {
            pooled_percentage(games, stat)
        } else {
            per_game_mean(games, stat)
        }
    });
    Some(metrics)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn game(day: u32) -> GameStatRecord {
        GameStatRecord::new("a-1", NaiveDate::from_ymd_opt(2025, 3, day).unwrap())
    }

    #[test]
    fn test_empty_window() {
        assert!(compute_metrics(&[]).is_none());
    }

    #[test]
    fn test_zero_attempts_yield_zero_percentages() {
        let g = game(1);
        let metrics = compute_metrics(&[&g]).unwrap();
        for stat in StatKey::ALL {
            assert_eq!(metrics[stat], 0.0, "{stat}");
            assert!(!metrics[stat].is_nan());
        }
    }

    #[test]
    fn test_percentages_pool_attempts() {
        let mut g1 = game(1);
        g1.ft_made = 1;
        g1.ft_attempted = 1;
        let mut g2 = game(2);
        g2.ft_made = 2;
        g2.ft_attempted = 7;
        let metrics = compute_metrics(&[&g1, &g2]).unwrap();
        assert_eq!(metrics[StatKey::FreeThrowPct], 3.0 / 8.0);
    }

    #[test]
    fn test_counts_are_per_game_means() {
        let mut g1 = game(1);
        g1.off_rebounds = 2;
        g1.def_rebounds = 4;
        g1.points = 10;
        g1.turnovers = 3;
        let mut g2 = game(2);
        g2.def_rebounds = 2;
        g2.points = 20;
        g2.turnovers = 1;
        let metrics = compute_metrics(&[&g1, &g2]).unwrap();
        assert_eq!(metrics[StatKey::Rebounds], 4.0);
        assert_eq!(metrics[StatKey::Points], 15.0);
        assert_eq!(metrics[StatKey::Turnovers], 2.0);
        assert_eq!(metrics[StatKey::Steals], 0.0);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let big = |day| {
            let mut g = game(day);
            g.ft_made = 3_000_000_000;
            g.ft_attempted = 4_000_000_000;
            g.off_rebounds = u32::MAX;
            g.def_rebounds = u32::MAX;
            g
        };
        let (g1, g2) = (big(1), big(2));
        let metrics = compute_metrics(&[&g1, &g2]).unwrap();
        assert!((metrics[StatKey::FreeThrowPct] - 0.75).abs() < 1e-6);
        assert!(metrics[StatKey::Rebounds].is_finite());
        assert!(metrics[StatKey::Rebounds] > 8.0e9);
    }
}
