use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {details}")]
    Read { path: String, details: String },

    #[error("Failed to parse {path}: {details}")]
    Parse { path: String, details: String },

    #[error("Failed to serialize {what}: {details}")]
    Serialize { what: String, details: String },

    #[error("Failed to write {path}: {details}")]
    Write { path: String, details: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoryError {
    #[error("Story source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed story response: {0}")]
    Malformed(String),

    #[error("Story request rejected with status '{0}'")]
    Rejected(String),

    #[error("Story worker disconnected")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodenameError {
    #[error("INVALID CODENAME")]
    Invalid,

    #[error("ENTER A CODENAME")]
    Empty,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to create sound directory {path}: {details}")]
    Directory { path: String, details: String },

    #[error("Failed to write cue {path}: {source}")]
    Wav {
        path: String,
        #[source]
        source: hound::Error,
    },
}
