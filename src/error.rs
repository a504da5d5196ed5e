use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("dataset {name} not implemented")]
    UnsupportedDataset { name: String },

    #[error("no bundled resource named {name}")]
    ResourceNotFound { name: String },

    #[error("couldn't read {path}: {message}")]
    Io { path: String, message: String },

    #[error("{resource} is malformed: {message}")]
    MalformedResource { resource: String, message: String },

    #[error("{resource} has no column `{column}`")]
    MissingColumn { resource: String, column: String },

    #[error("bad parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("dimensions don't match: {message}")]
    InvalidDimensions { message: String },

    #[error("survival data is broken: {message}")]
    InvalidSurvivalData { message: String },
}

impl DatasetError {
    pub fn unsupported_dataset(name: impl Into<String>) -> Self {
        Self::UnsupportedDataset { name: name.into() }
    }

    pub fn resource_not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn malformed(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResource {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn missing_column(resource: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            resource: resource.into(),
            column: column.into(),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions { message: message.into() }
    }

    pub fn invalid_survival_data(message: impl Into<String>) -> Self {
        Self::InvalidSurvivalData { message: message.into() }
    }
}
