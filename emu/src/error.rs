use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: {1}")]
    Syntax(String, String),

    #[error("Label `{0}` defined twice")]
    DuplicateLabel(String),

    #[error("No variable cell left for `{0}`")]
    VariableOverflow(String),

    #[error("Program does not fit in {0} ROM words")]
    RomOverflow(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] io::Error),

    #[error("Failed to parse config: {0}")]
    Config(String, #[source] serde_yaml::Error),
}
