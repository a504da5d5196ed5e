use std::path::{Path, PathBuf};

/// where the raw csv files come from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    /// the copies compiled into the crate
    #[default]
    Bundled,
    /// a directory holding `pbc2.csv` / `support2.csv`
    Directory(PathBuf),
}

/// per-call load configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    sequential: bool,
    source: DataSource,
}

impl LoadOptions {
    /// flat output, bundled data
    pub fn new() -> Self {
        Self::default()
    }

    /// group rows per subject (PBC only, other readers ignore it)
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// read the csv files from `dir` instead of the bundled copies
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source = DataSource::Directory(dir.as_ref().to_path_buf());
        self
    }

    /// replace the data source wholesale
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// whether PBC rows get grouped per subject
    pub fn sequential(&self) -> bool {
        self.sequential
    }

    /// where the csv files are read from
    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::new();
        assert!(!options.sequential());
        assert_eq!(options.source(), &DataSource::Bundled);
    }

    #[test]
    fn test_builder_chain() {
        let options = LoadOptions::new()
            .with_sequential(true)
            .with_data_dir("/data/survival");

        assert!(options.sequential());
        assert_eq!(
            options.source(),
            &DataSource::Directory(PathBuf::from("/data/survival"))
        );
    }
}
