//! Error types for random faction generation

use thiserror::Error;

use crate::model::FactionId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("placeholder definition {key} has no replacement rule")]
    UnrecognizedPlaceholderKind { key: String },

    #[error("no eligible faction definitions to draw from")]
    EmptyCandidateSet,

    #[error("faction {0} not found in world")]
    UnknownFaction(FactionId),

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
