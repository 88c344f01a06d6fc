use arch::{
    inst::Inst,
    reg::{self, Reg},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use strum::IntoEnumIterator;

use super::Hook;
use crate::{error::Error, model::State};

/// Prints machine state whenever a listed ROM address executes.
///
/// ```yaml
/// 12:
///   stack: true
///   ram: [16, 17]
/// ```
#[derive(Debug, Default)]
pub struct Dump {
    file: Option<String>,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<u16>,
}

impl Dump {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        let list: List = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(path.to_string(), e))?;
        Ok(Self {
            file: Some(path.to_string()),
            list,
        })
    }

    fn get(&self, pc: u16) -> Option<&Config> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        state
    }

    fn exec(&mut self, _time: u64, addr: u16, _inst: Inst, cpu: State) -> State {
        if let Some(cfg) = self.get(addr) {
            println!(" +-- {:0>4X} ---------------------------------------+", addr);
            self.print_reg(&cpu);
            if cfg.stack {
                self.print_stack(&cpu);
            }
            self.print_ram(&cpu, &cfg.ram);
        }
        cpu
    }
}

impl Dump {
    fn print_reg(&self, cpu: &State) {
        println!(
            " |   A: {:>6} |   D: {:>6} |  PC: {:0>4X}            |",
            cpu.a(),
            cpu.d(),
            cpu.pc()
        );
        for reg in Reg::iter() {
            println!(" | {:>4}: {:>6}                                   |", reg, cpu.get(reg));
        }
        println!(" +------------------------------------------------+");
    }

    fn print_stack(&self, cpu: &State) {
        let sp = (cpu.get(Reg::SP) as u16).clamp(reg::STACK_BASE, reg::SCREEN);
        for addr in reg::STACK_BASE..sp {
            println!(" | {:0>4X} : {:>6}                                  |", addr, cpu.get(addr));
        }
        println!(" +------------------------------------------------+");
    }

    fn print_ram(&self, cpu: &State, addrs: &[u16]) {
        for addr in addrs {
            let name = cpu.rom().var_at(*addr).unwrap_or("");
            println!(
                " | {:0>4X} : {:>6}  {:<30}  |",
                addr,
                cpu.get(*addr),
                name
            );
        }
        println!(" +------------------------------------------------+");
    }
}
