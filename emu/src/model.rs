use arch::{asm::Jump, inst::Inst, reg::RAM_SIZE};

use crate::rom::Rom;

/// Hack CPU with its data memory and program.
pub struct State {
    rom: Rom,
    ram: Vec<i16>,
    a: i16,
    d: i16,
    pc: u16,
    halted: bool,
}

// Memory access
impl State {
    /// Cells outside data memory read as zero.
    pub fn get(&self, addr: impl Into<u16>) -> i16 {
        self.ram.get(addr.into() as usize).copied().unwrap_or(0)
    }

    /// Writes outside data memory are dropped.
    pub fn set(&mut self, addr: impl Into<u16>, val: i16) {
        if let Some(cell) = self.ram.get_mut(addr.into() as usize) {
            *cell = val;
        }
    }

    pub fn a(&self) -> i16 {
        self.a
    }

    pub fn d(&self) -> i16 {
        self.d
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn rom(&self) -> &Rom {
        &self.rom
    }
}

impl State {
    pub fn new(rom: Rom) -> Self {
        State {
            rom,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            halted: false,
        }
    }

    /// Halted on the `@X / (X) 0;JMP` idiom or ran off the end of ROM.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc as usize >= self.rom.len()
    }

    /// Execute one instruction. Returns its address and the instruction,
    /// or `None` once the machine has stopped.
    pub fn exec(&mut self) -> Option<(u16, Inst)> {
        if self.is_terminated() {
            return None;
        }
        let pc = self.pc;
        let inst = self.rom.get(pc)?;
        match inst {
            Inst::At(v) => {
                self.a = v as i16;
                self.pc += 1;
            }
            Inst::Calc(dest, comp, jump) => {
                let addr = self.a as u16;
                let y = match comp.reads_m() {
                    true => self.get(addr),
                    false => self.a,
                };
                let out = comp.eval(self.d, y);
                if dest.m() {
                    self.set(addr, out);
                }
                if dest.a() {
                    self.a = out;
                }
                if dest.d() {
                    self.d = out;
                }
                if jump.test(out) {
                    self.halted = jump == Jump::JMP
                        && addr.wrapping_add(1) == pc
                        && self.rom.get(addr) == Some(Inst::At(addr));
                    self.pc = addr;
                } else {
                    self.pc += 1;
                }
            }
        }
        Some((pc, inst))
    }

    /// Run until the machine stops or `tmax` instructions have executed.
    /// Returns the number of executed instructions.
    pub fn run(&mut self, tmax: u64) -> u64 {
        let mut time = 0;
        while time < tmax && self.exec().is_some() {
            time += 1;
        }
        time
    }
}
