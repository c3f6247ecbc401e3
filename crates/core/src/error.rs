use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Underlying reason a preset file could not be loaded.
#[derive(Error, Debug)]
pub enum LoadCause {
    #[error("{}", .0)]
    Io(#[from] std::io::Error),

    #[error("{}", .0)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not load preset `{}` from `{}`: {}", .name, .path, .cause)]
    Load {
        name: String,
        path: String,
        cause: LoadCause,
    },

    #[error("Directory `{}` does not exist.", .path)]
    InvalidDirectory { path: String },

    #[error("Required field `{}` is not set.", .0)]
    MissingField(&'static str),

    #[error("Could not split additional arguments (unbalanced quotes?): {}", .0)]
    AdditionalArguments(String),

    #[error("Could not launch `{}`: {}", .program, .original)]
    Launch {
        program: String,
        original: std::io::Error,
    },

    #[error("Unknown sampling method: \"{}\"", .0)]
    UnknownSamplingMethod(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing message template: {}", .0)]
    Template(#[from] ParseError),

    #[error("Error rendering message template: {}", .0)]
    Render(#[from] RenderError),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn load_error(name: &str, path: String, cause: impl Into<LoadCause>) -> Self {
        Self::Load {
            name: name.to_string(),
            path,
            cause: cause.into(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// True for errors that end the configuration session rather than
    /// returning to the main menu.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::InvalidDirectory { .. }
                | Self::MissingField(_)
                | Self::AdditionalArguments(_)
                | Self::Launch { .. }
        )
    }
}
