use std::borrow::Cow;
use std::fs;

use crate::config::DataSource;
use crate::error::{DatasetError, Result};

// synthetic stand-ins with the public files' schema, see the crate docs
pub const PBC_RESOURCE: &str = "datasets/pbc2.csv";
pub const SUPPORT_RESOURCE: &str = "datasets/support2.csv";

static PBC_CSV: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/datasets/pbc2.csv"));
static SUPPORT_CSV: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/datasets/support2.csv"));

/// raw bytes of a bundled file, by logical name
pub fn bundled(name: &str) -> Result<&'static [u8]> {
    match name {
        PBC_RESOURCE => Ok(PBC_CSV),
        SUPPORT_RESOURCE => Ok(SUPPORT_CSV),
        _ => Err(DatasetError::resource_not_found(name)),
    }
}

/// resolve `name` against the configured source
///
/// a directory source looks up the file name part of `name` inside the
/// directory, so `datasets/pbc2.csv` becomes `<dir>/pbc2.csv`.
pub fn read_resource(name: &str, source: &DataSource) -> Result<Cow<'static, [u8]>> {
    match source {
        DataSource::Bundled => bundled(name).map(Cow::Borrowed),
        DataSource::Directory(dir) => {
            let file_name = name.rsplit('/').next().unwrap_or(name);
            let path = dir.join(file_name);
            log::debug!("reading {} from {}", name, path.display());

            fs::read(&path)
                .map(Cow::Owned)
                .map_err(|err| DatasetError::io(path.display().to_string(), &err))
        }
    }
}
