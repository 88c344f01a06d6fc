use arch::{
    asm::{Addr, Asm},
    inst::Inst,
    reg,
};
use bimap::BiMap;
use indexmap::IndexMap;

use crate::error::Error;

/// Instruction memory is addressed by 15 bits.
pub const ROM_SIZE: usize = 0x8000;

/// An assembled program with its symbol tables.
#[derive(Debug, Default, Clone)]
pub struct Rom {
    insts: Vec<Inst>,
    labels: IndexMap<String, u16>,
    vars: BiMap<String, u16>,
}

impl Rom {
    pub fn assemble(code: &[Asm]) -> Result<Rom, Error> {
        let mut rom = Rom::default();

        // 1. Collect labels
        let mut pc = 0;
        for asm in code {
            match asm {
                Asm::Label(name) => {
                    if rom.labels.contains_key(name) {
                        return Err(Error::DuplicateLabel(name.clone()));
                    }
                    rom.labels.insert(name.clone(), pc as u16);
                }
                Asm::At(_) | Asm::Calc(..) => pc += 1,
                Asm::Comment(_) => {}
            }
        }
        if pc > ROM_SIZE {
            return Err(Error::RomOverflow(ROM_SIZE));
        }

        // 2. Resolve symbols
        for asm in code {
            let inst = match asm {
                Asm::At(Addr::Value(v)) => Inst::At(*v),
                Asm::At(Addr::Symbol(name)) => Inst::At(rom.resolve(name)?),
                Asm::Calc(dest, comp, jump) => Inst::Calc(*dest, *comp, *jump),
                Asm::Label(_) | Asm::Comment(_) => continue,
            };
            rom.insts.push(inst);
        }
        Ok(rom)
    }

    /// Labels first, then predefined names, then variables in first-use order.
    fn resolve(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(addr) = self.labels.get(name) {
            return Ok(*addr);
        }
        if let Some(addr) = reg::predefined(name) {
            return Ok(addr);
        }
        if let Some(addr) = self.vars.get_by_left(name) {
            return Ok(*addr);
        }
        let addr = reg::VARIABLE + self.vars.len() as u16;
        if addr >= reg::STACK_BASE {
            return Err(Error::VariableOverflow(name.to_string()));
        }
        self.vars.insert(name.to_string(), addr);
        Ok(addr)
    }

    pub fn parse(path: &str, text: &str) -> Result<Rom, Error> {
        let mut code = vec![];
        for (idx, line) in text.lines().enumerate() {
            match Asm::parse(line) {
                Ok(Some(asm)) => code.push(asm),
                Ok(None) => {}
                Err(msg) => return Err(Error::Syntax(format!("{}:{}", path, idx + 1), msg)),
            }
        }
        Rom::assemble(&code)
    }

    pub fn load(path: &str) -> Result<Rom, Error> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        Rom::parse(path, &text)
    }
}

impl Rom {
    pub fn get(&self, pc: u16) -> Option<Inst> {
        self.insts.get(pc as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn label(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    /// Labels in definition order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, u16)> {
        self.labels.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn var(&self, name: &str) -> Option<u16> {
        self.vars.get_by_left(name).copied()
    }

    /// Name of the variable allocated at a RAM address.
    pub fn var_at(&self, addr: u16) -> Option<&str> {
        self.vars.get_by_right(&addr).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_order() {
        let mut rom = Rom::default();
        rom.labels.insert("LOOP".to_string(), 4);
        assert_eq!(rom.resolve("LOOP").unwrap(), 4);
        assert_eq!(rom.resolve("THAT").unwrap(), 4);
        assert_eq!(rom.resolve("R13").unwrap(), 13);
        assert_eq!(rom.resolve("x").unwrap(), 16);
        assert_eq!(rom.resolve("y").unwrap(), 17);
        assert_eq!(rom.resolve("x").unwrap(), 16);
        assert_eq!(rom.var_at(17), Some("y"));
    }

    #[test]
    fn test_variable_overflow() {
        let mut rom = Rom::default();
        for n in 0..(reg::STACK_BASE - reg::VARIABLE) {
            rom.resolve(&format!("v{}", n)).unwrap();
        }
        assert!(matches!(
            rom.resolve("one.more"),
            Err(Error::VariableOverflow(name)) if name == "one.more"
        ));
    }
}
