use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("More argument required")]
    MissingArgument,

    #[error("Unexpected argument: `{0}`")]
    ExtraArgument(String),

    #[error("Cannot parse `{0}` as index")]
    ParseIndex(String),

    #[error("Cannot pop into the constant segment")]
    PopConstant,

    #[error("Constant `{0}` does not fit in 15 bits")]
    ConstantOutOfRange(u16),

    #[error("Index `{0}` is outside the addressable range")]
    IndexOutOfRange(u16),

    #[error("Static segment requires a source unit name")]
    MissingUnitName,

    #[error("Invalid source unit name: `{0}`")]
    InvalidUnitName(String),

    #[error("No input files")]
    NoInput,

    #[error("Output file given for {0} source units")]
    AmbiguousOutput(usize),

    #[error("Source unit `{0}` defined twice: {1} and {2}")]
    DuplicateUnit(String, String, String),

    #[error("{0} source unit(s) failed to translate")]
    Failed(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}
