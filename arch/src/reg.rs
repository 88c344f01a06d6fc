use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Memory cells with a fixed role in the VM calling convention.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u16)]
pub enum Reg {
    SP = 0,
    LCL = 1,
    ARG = 2,
    THIS = 3,
    THAT = 4,
}

impl Reg {
    pub fn addr(self) -> u16 {
        self.into()
    }
}

// Fixed memory map
pub const POINTER: u16 = 3;
pub const TEMP: u16 = 5;
pub const SCRATCH: u16 = 13;
pub const VARIABLE: u16 = 16;
pub const SCREEN: u16 = 0x4000;
pub const KBD: u16 = 0x6000;

pub const RAM_SIZE: usize = 0x8000;
pub const STACK_BASE: u16 = 256;

/// Symbols every assembly program may reference without defining them.
static PREDEFINED: Lazy<HashMap<String, u16>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for reg in Reg::iter() {
        map.insert(reg.to_string(), reg.addr());
    }
    for n in 0..16 {
        map.insert(format!("R{}", n), n);
    }
    map.insert("SCREEN".to_string(), SCREEN);
    map.insert("KBD".to_string(), KBD);
    map
});

pub fn predefined(name: &str) -> Option<u16> {
    PREDEFINED.get(name).copied()
}

/// Name of the `R0`..`R15` alias for a low address.
pub fn rname(addr: u16) -> String {
    format!("R{}", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_addr() {
        assert_eq!(Reg::SP.addr(), 0);
        assert_eq!(Reg::THAT.addr(), 4);
        assert_eq!(Reg::try_from(2u16).ok(), Some(Reg::ARG));
    }

    #[test]
    fn test_reg_name() {
        assert_eq!("LCL".parse::<Reg>(), Ok(Reg::LCL));
        assert!("lcl".parse::<Reg>().is_err());
        assert_eq!(Reg::THIS.to_string(), "THIS");
    }

    #[test]
    fn test_predefined() {
        assert_eq!(predefined("SP"), Some(0));
        assert_eq!(predefined("THIS"), Some(3));
        assert_eq!(predefined("R13"), Some(SCRATCH));
        assert_eq!(predefined("R15"), Some(15));
        assert_eq!(predefined("SCREEN"), Some(16384));
        assert_eq!(predefined("KBD"), Some(24576));
        assert_eq!(predefined("R16"), None);
        assert_eq!(predefined("Foo.1"), None);
    }
}
