use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One athlete's recorded box-score line for one game.
///
/// Records are immutable once recorded and are only ever read by the analyzer.
///
/// ```json
/// {
///   "athlete_id": "a-17",
///   "game_date": "2025-01-18",
///   "fg_made": 6, "fg_attempted": 13,
///   "two_made": 4, "two_attempted": 8,
///   "three_made": 2, "three_attempted": 5,
///   "ft_made": 3, "ft_attempted": 4,
///   "off_rebounds": 1, "def_rebounds": 4,
///   "assists": 3, "steals": 1, "blocks": 0,
///   "turnovers": 2, "fouls": 3, "points": 17
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatRecord {
    pub athlete_id: String,
    pub game_date: NaiveDate,
    #[serde(default)]
    pub fg_made: u32,
    #[serde(default)]
    pub fg_attempted: u32,
    #[serde(default)]
    pub two_made: u32,
    #[serde(default)]
    pub two_attempted: u32,
    #[serde(default)]
    pub three_made: u32,
    #[serde(default)]
    pub three_attempted: u32,
    #[serde(default)]
    pub ft_made: u32,
    #[serde(default)]
    pub ft_attempted: u32,
    #[serde(default)]
    pub off_rebounds: u32,
    #[serde(default)]
    pub def_rebounds: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub steals: u32,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub fouls: u32,
    #[serde(default)]
    pub points: u32,
}

impl GameStatRecord {
    /// An empty stat line for `athlete_id` on `game_date`.
    #[must_use]
    pub fn new(athlete_id: impl Into<String>, game_date: NaiveDate) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            game_date,
            fg_made: 0,
            fg_attempted: 0,
            two_made: 0,
            two_attempted: 0,
            three_made: 0,
            three_attempted: 0,
            ft_made: 0,
            ft_attempted: 0,
            off_rebounds: 0,
            def_rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            fouls: 0,
            points: 0,
        }
    }

    /// Offensive plus defensive rebounds.
    #[must_use]
    pub fn rebounds(&self) -> u64 {
        u64::from(self.off_rebounds) + u64::from(self.def_rebounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts_default_to_zero() {
        let record: GameStatRecord = serde_json::from_str(
            r#"{"athlete_id": "a-1", "game_date": "2025-02-01", "ft_made": 2, "ft_attempted": 5}"#,
        )
        .unwrap();
        assert_eq!(record.ft_made, 2);
        assert_eq!(record.fg_attempted, 0);
        assert_eq!(
            record.game_date,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_rebounds_sum_both_ends() {
        let mut record =
            GameStatRecord::new("a-1", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        record.off_rebounds = 2;
        record.def_rebounds = 5;
        assert_eq!(record.rebounds(), 7);

        record.off_rebounds = u32::MAX;
        record.def_rebounds = u32::MAX;
        assert_eq!(record.rebounds(), 2 * u64::from(u32::MAX));
    }
}
