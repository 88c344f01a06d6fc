use bimap::BiMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// The `comp` field of a compute instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Comp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

static COMP_STR: Lazy<BiMap<Comp, &'static str>> = Lazy::new(|| {
    let mut map: BiMap<Comp, &'static str> = BiMap::new();
    map.insert(Comp::Zero, "0");
    map.insert(Comp::One, "1");
    map.insert(Comp::MinusOne, "-1");
    map.insert(Comp::D, "D");
    map.insert(Comp::A, "A");
    map.insert(Comp::M, "M");
    map.insert(Comp::NotD, "!D");
    map.insert(Comp::NotA, "!A");
    map.insert(Comp::NotM, "!M");
    map.insert(Comp::NegD, "-D");
    map.insert(Comp::NegA, "-A");
    map.insert(Comp::NegM, "-M");
    map.insert(Comp::DPlusOne, "D+1");
    map.insert(Comp::APlusOne, "A+1");
    map.insert(Comp::MPlusOne, "M+1");
    map.insert(Comp::DMinusOne, "D-1");
    map.insert(Comp::AMinusOne, "A-1");
    map.insert(Comp::MMinusOne, "M-1");
    map.insert(Comp::DPlusA, "D+A");
    map.insert(Comp::DPlusM, "D+M");
    map.insert(Comp::DMinusA, "D-A");
    map.insert(Comp::DMinusM, "D-M");
    map.insert(Comp::AMinusD, "A-D");
    map.insert(Comp::MMinusD, "M-D");
    map.insert(Comp::DAndA, "D&A");
    map.insert(Comp::DAndM, "D&M");
    map.insert(Comp::DOrA, "D|A");
    map.insert(Comp::DOrM, "D|M");
    map
});

impl Comp {
    pub fn parse(s: &str) -> Result<Comp, String> {
        if let Some(comp) = COMP_STR.get_by_right(s) {
            return Ok(*comp);
        }
        // Commutative spellings
        match s {
            "A+D" => Ok(Comp::DPlusA),
            "M+D" => Ok(Comp::DPlusM),
            "A&D" => Ok(Comp::DAndA),
            "M&D" => Ok(Comp::DAndM),
            "A|D" => Ok(Comp::DOrA),
            "M|D" => Ok(Comp::DOrM),
            _ => Err(format!("Unknown comp: `{}`", s)),
        }
    }

    pub fn format(&self) -> &'static str {
        COMP_STR.get_by_left(self).copied().unwrap_or("?")
    }

    /// Whether the computation reads memory instead of the A register.
    pub fn reads_m(&self) -> bool {
        use Comp::*;
        matches!(
            self,
            M | NotM | NegM | MPlusOne | MMinusOne | DPlusM | DMinusM | MMinusD | DAndM | DOrM
        )
    }

    /// ALU model. `y` is the A register or the memory cell it addresses.
    pub fn eval(&self, d: i16, y: i16) -> i16 {
        use Comp::*;
        match self {
            Zero => 0,
            One => 1,
            MinusOne => -1,
            D => d,
            A | M => y,
            NotD => !d,
            NotA | NotM => !y,
            NegD => d.wrapping_neg(),
            NegA | NegM => y.wrapping_neg(),
            DPlusOne => d.wrapping_add(1),
            APlusOne | MPlusOne => y.wrapping_add(1),
            DMinusOne => d.wrapping_sub(1),
            AMinusOne | MMinusOne => y.wrapping_sub(1),
            DPlusA | DPlusM => d.wrapping_add(y),
            DMinusA | DMinusM => d.wrapping_sub(y),
            AMinusD | MMinusD => y.wrapping_sub(d),
            DAndA | DAndM => d & y,
            DOrA | DOrM => d | y,
        }
    }
}

impl std::fmt::Display for Comp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
