use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::{error::Error, model::State};

/// Test script: initial RAM, expected RAM after the run, optional step limit.
///
/// ```yaml
/// ram:
///   0: 256
/// expect:
///   0: 257
///   256: 15
/// tmax: 1000
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub ram: IndexMap<u16, i16>,
    #[serde(default)]
    pub expect: IndexMap<u16, i16>,
    #[serde(default)]
    pub tmax: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub addr: u16,
    pub expect: i16,
    pub actual: i16,
}

impl Script {
    pub fn load(path: &str) -> Result<Script, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_string(), e))
    }

    pub fn parse(text: &str) -> Result<Script, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config("<inline>".to_string(), e))
    }

    pub fn apply(&self, state: &mut State) {
        for (addr, val) in &self.ram {
            state.set(*addr, *val);
        }
    }

    /// Expected cells that differ, in script order.
    pub fn check(&self, state: &State) -> Vec<Mismatch> {
        self.expect
            .iter()
            .filter(|(addr, val)| state.get(**addr) != **val)
            .map(|(addr, val)| Mismatch {
                addr: *addr,
                expect: *val,
                actual: state.get(*addr),
            })
            .collect()
    }
}
