use arch::inst::Inst;
use color_print::cprintln;

use super::Hook;
use crate::model::State;

/// Prints every executed instruction with the registers it leaves behind.
#[derive(Debug)]
pub struct Trace {
    enabled: bool,
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        Trace { enabled }
    }
}

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        if self.enabled {
            println!(" * Trace");
        }
        state
    }

    fn exec(&mut self, time: u64, addr: u16, inst: Inst, state: State) -> State {
        if self.enabled {
            cprintln!(
                "<dim>[{:0>6}]</> <b>{:0>4X}</> {:016b} {:<24} <dim>A={:<6} D={:<6}</>",
                time,
                addr,
                inst.to_bin(),
                inst.cformat(),
                state.a(),
                state.d()
            );
        }
        state
    }
}
