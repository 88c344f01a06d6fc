pub mod alu;
pub mod asm;
pub mod inst;
pub mod reg;
