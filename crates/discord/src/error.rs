use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Serenity(#[from] serenity::Error),

    #[error(transparent)]
    Channel(#[from] switchboard_channels::Error),

    #[error(transparent)]
    Media(#[from] switchboard_media::Error),

    #[error("invalid account config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid discord id {id:?}")]
    InvalidId { id: String },

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

impl From<Error> for switchboard_channels::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Channel(inner) => inner,
            Error::InvalidId { id } => Self::invalid_input(format!("invalid discord id {id:?}")),
            Error::Config(inner) => Self::SerdeJson(inner),
            other => Self::external("discord", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
