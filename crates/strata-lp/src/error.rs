#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("variable `{name}` is not binary; this solver only handles 0/1 models")]
    NonBinaryVariable { name: String },

    #[error("objective references unknown variable `{name}`")]
    UnknownVariable { name: String },

    #[error("search exceeded the node limit of {limit}")]
    NodeLimit { limit: u64 },

    #[error("solver transport failed: {message}")]
    Transport { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
