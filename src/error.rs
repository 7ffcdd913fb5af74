use std::io;

/// Errors raised while configuring, running or reporting a solver run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
    #[error("EmptyCitySet: a tour needs at least one city")]
    EmptyCitySet,
    #[error("IoError: {0}")]
    Io(#[from] io::Error),
    #[error("RenderError: {0}")]
    Render(String),
    #[error("WorkerDisconnected: received {received} of {expected} results")]
    WorkerDisconnected { received: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
