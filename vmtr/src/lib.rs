pub mod dump;
pub mod error;
pub mod label;
pub mod msg;
pub mod parser;
pub mod translate;
pub mod unit;

pub use error::Error;
pub use parser::{Arith, Command, Direction, Segment};
pub use translate::Translator;
pub use unit::{Translation, Unit};
