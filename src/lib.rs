//! # survival datasets
//!
//! clinical survival datasets, loaded and preprocessed into the usual
//! `(x, t, e)` triple - covariates, time to event/censoring, event indicator
//!
//! ## what you get
//!
//! - PBC (repeated visits per patient), flat or grouped per subject
//! - SUPPORT (one row per patient)
//! - one-hot encoding, mean imputation & standardization already applied
//! - `increase_censoring` for heavier-censoring robustness experiments
//!
//! ## bundled data
//!
//! the csv files compiled into the crate are **synthetic stand-ins**: same
//! columns, same category spellings, `NA` for missing - but generated, not
//! the PBC or SUPPORT study records. good for wiring & tests, not for
//! results. for the real files, download `pbc2.csv` / `support2.csv` and use
//! `LoadOptions::new().with_data_dir(dir)`.
//!
//! ## quick start
//!
//! ```rust
//! use survival_datasets::{increase_censoring, load_dataset, LoadOptions};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let support = load_dataset("SUPPORT", &LoadOptions::new())?;
//! let (x, mut t, mut e) = support.into_flat().expect("SUPPORT is flat").into_parts();
//! assert_eq!(x.nrows(), t.len());
//!
//! // censor another 20% of the observed deaths
//! let mut rng = StdRng::seed_from_u64(42);
//! let switched = increase_censoring(&mut e, &mut t, 0.2, &mut rng)?;
//! assert!(switched.iter().all(|&i| e[i] == 0));
//! # Ok(())
//! # }
//! ```

pub mod censoring;
pub mod config;
pub mod data;
pub mod datasets;
pub mod error;
pub mod pbc;
pub mod preprocessing;
pub mod resources;
pub mod sequence;
pub mod support;
pub mod table;

pub use censoring::increase_censoring;
pub use config::{DataSource, LoadOptions};
pub use data::{LoadedDataset, Subject, SubjectSequences, SurvivalData};
pub use datasets::{load_dataset, DatasetName};
pub use error::{DatasetError, Result};
