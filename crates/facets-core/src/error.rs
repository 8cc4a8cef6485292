use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed filter token '{token}': missing separator '{separator}'")]
    MalformedToken { token: String, separator: char },

    #[error("Unknown url alias '{alias}' in facet source '{facet_source_id}'")]
    UnknownAlias { alias: String, facet_source_id: String },

    #[error("No matching route for path '{0}'")]
    UnroutablePath(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborator (facet storage, router) failed for a reason other than
    /// a missing entry.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
