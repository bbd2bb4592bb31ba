//! Random-forest drill recommendation.
//!
//! The forest is retrained from the live drill catalog instead of being loaded
//! from a model file, so newly added drills can be recommended right away.
//!
//! # Pipeline
//!
//! ```text
//! Drill catalog
//!     ↓ synthetic samples (sample)       tag vector + N(0, sigma) noise, label = drill id
//!     ↓ bootstrap + CART/Gini (tree)     one tree per scoped thread
//! Forest (forest, cache)                 reused while the catalog is unchanged
//!     ↓ one-hot query per deficient stat, votes * magnitude / trees (predict)
//! Ranked drill ids
//!     ↓ truncate to max_drills (regimen)
//! Regimen
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use regimen_core::{Drill, GameStatRecord, StatKey};
//! use regimen_forest::{config::RegimenConfig, regimen::RegimenPlanner};
//!
//! let mut game = GameStatRecord::new("a-7", NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
//! game.ft_made = 2;
//! game.ft_attempted = 10;
//! let drills = [Drill::new(1, "Free throw ladder", [StatKey::FreeThrowPct])];
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let mut planner = RegimenPlanner::new(RegimenConfig::default()).unwrap();
//! let regimen = planner.plan("a-7", &[game], &drills, &mut rng);
//! assert!(regimen.focus.iter().any(|label| label == "FT%"));
//! assert_eq!(regimen.drill_ids.len(), 1);
//! ```

pub mod cache;
pub mod config;
pub mod forest;
pub mod params;
pub mod predict;
pub mod regimen;
pub mod sample;
pub mod tree;
