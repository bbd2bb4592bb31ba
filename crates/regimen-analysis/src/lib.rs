//! Performance analysis: turning an athlete's recent games into attention areas.
//!
//! # Pipeline
//!
//! ```text
//! GameStatRecord rows (all athletes)
//!     ↓ filter to athlete, newest first, take `lookback`
//! Window metrics (metrics)            FG% .. FT% pooled, counts per game
//!     ↓ compare with baseline (baseline)
//! Deficiency scores                   z-score against the reference table
//!     ↓ keep negatives, ascending (attention)
//! Attention areas                     [{stat, score}, ...]
//!     ↓
//! PerformanceMap                      |score| per stat, fed to the recommender
//! ```
//!
//! Analysis is deterministic and never fails: an athlete with no games, or a
//! lookback of zero, simply has no attention areas.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use regimen_analysis::analyzer::analyze_player_performance;
//! use regimen_core::{GameStatRecord, StatKey};
//!
//! let mut game = GameStatRecord::new("a-7", NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
//! game.ft_made = 2;
//! game.ft_attempted = 5;
//!
//! let report = analyze_player_performance("a-7", &[game], 5);
//! assert!(report.attention_areas.iter().any(|a| a.stat == StatKey::FreeThrowPct));
//! ```

pub mod analyzer;
pub mod attention;
pub mod baseline;
pub mod metrics;
