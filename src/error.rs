use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not load required sprite {}", path.display())]
    Sprite {
        path: PathBuf,
        #[source]
        source: macroquad::Error,
    },
    #[error("could not create log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
