use std::fmt;
use std::str::FromStr;

use crate::config::LoadOptions;
use crate::data::LoadedDataset;
use crate::error::{DatasetError, Result};
use crate::pbc::load_pbc;
use crate::resources::{PBC_RESOURCE, SUPPORT_RESOURCE};
use crate::support::load_support;

/// the datasets this crate knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetName {
    /// one row per patient, flat only
    #[default]
    Support,
    /// repeated visits per patient, flat or sequential
    Pbc,
}

impl DatasetName {
    pub const ALL: [DatasetName; 2] = [DatasetName::Support, DatasetName::Pbc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Support => "SUPPORT",
            Self::Pbc => "PBC",
        }
    }

    /// logical name of the bundled csv
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Support => SUPPORT_RESOURCE,
            Self::Pbc => PBC_RESOURCE,
        }
    }

    pub fn load(self, options: &LoadOptions) -> Result<LoadedDataset> {
        match self {
            Self::Support => {
                if options.sequential() {
                    log::debug!("SUPPORT has no sequential form, ignoring the option");
                }
                load_support(options.source())
            }
            Self::Pbc => load_pbc(options.sequential(), options.source()),
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetName {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DatasetError::unsupported_dataset(s))
    }
}

/// load a dataset by name
///
/// `"SUPPORT"` or `"PBC"` (case-sensitive). The name is checked before any
/// data is read, so an unknown name fails without touching the source.
///
/// ```
/// use survival_datasets::{load_dataset, LoadOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pbc = load_dataset("PBC", &LoadOptions::new().with_sequential(true))?;
/// assert!(pbc.is_sequential());
///
/// assert!(load_dataset("METABRIC", &LoadOptions::new()).is_err());
/// # Ok(())
/// # }
/// ```
pub fn load_dataset(name: &str, options: &LoadOptions) -> Result<LoadedDataset> {
    let dataset: DatasetName = name.parse()?;
    dataset.load(options)
}
