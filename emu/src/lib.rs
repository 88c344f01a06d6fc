pub mod error;
pub mod hooks;
pub mod model;
pub mod rom;
pub mod script;

pub use error::Error;
pub use model::State;
pub use rom::Rom;
pub use script::Script;
