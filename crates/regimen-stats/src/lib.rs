//! Small numeric helpers for per-game stat summaries.
//!
//! # Modules
//!
//! - [`descriptive`]: mean, spread and range of a series of per-game values
//! - [`ratio`]: made/attempted ratios and z-scores with defined-zero policies
//!
//! # Examples
//!
//! ```
//! use regimen_stats::{descriptive::DescriptiveStats, ratio};
//!
//! let rebounds = [4.0, 6.0, 8.0];
//! let stats = DescriptiveStats::new(rebounds).unwrap();
//! assert_eq!(stats.mean, 6.0);
//!
//! assert_eq!(ratio::ratio(0, 0), 0.0);
//! assert!((ratio::zscore(0.55, 0.75, 0.10) + 2.0).abs() < 1e-4);
//! ```

pub mod descriptive;
pub mod ratio;
