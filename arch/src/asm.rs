use crate::{alu::Comp, reg::Reg};
use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

// ----------------------------------------------------------------------------
// Fields

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum Dest {
    #[default]
    #[strum(serialize = "")]
    Null,
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(dest) => Ok(dest),
            Err(_) => match s {
                "DM" => Ok(Dest::MD),
                "MA" => Ok(Dest::AM),
                "DA" => Ok(Dest::AD),
                _ => Err(format!("Unknown dest: `{s}`")),
            },
        }
    }

    pub fn a(&self) -> bool {
        matches!(self, Dest::A | Dest::AM | Dest::AD | Dest::AMD)
    }

    pub fn d(&self) -> bool {
        matches!(self, Dest::D | Dest::MD | Dest::AD | Dest::AMD)
    }

    pub fn m(&self) -> bool {
        matches!(self, Dest::M | Dest::MD | Dest::AM | Dest::AMD)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum Jump {
    #[default]
    #[strum(serialize = "")]
    Null,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(jump) if jump != Jump::Null => Ok(jump),
            _ => Err(format!("Unknown jump: `{s}`")),
        }
    }

    /// Branch predicate over the ALU output.
    pub fn test(&self, out: i16) -> bool {
        match self {
            Jump::Null => false,
            Jump::JGT => out > 0,
            Jump::JEQ => out == 0,
            Jump::JGE => out >= 0,
            Jump::JLT => out < 0,
            Jump::JNE => out != 0,
            Jump::JLE => out <= 0,
            Jump::JMP => true,
        }
    }
}

// ----------------------------------------------------------------------------
// Address operand

/// Largest value an address instruction can load.
pub const IMM_MAX: u16 = 0x7FFF;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Addr {
    Value(u16),
    Symbol(String),
}

impl Addr {
    fn parse(s: &str) -> Result<Addr, String> {
        if s.is_empty() {
            return Err(format!("Empty address"));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<u16>() {
                Ok(v) if v <= IMM_MAX => Ok(Addr::Value(v)),
                _ => Err(format!("Address out of range: `{s}`")),
            };
        }
        if is_symbol(s) {
            Ok(Addr::Symbol(s.to_string()))
        } else {
            Err(format!("Invalid symbol: `{s}`"))
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addr::Value(v) => write!(f, "{}", v),
            Addr::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// Symbols are letters, digits, `_`, `.`, `$`, `:` and never start with a digit.
pub fn is_symbol(s: &str) -> bool {
    match s.chars().next() {
        Some(head) if !head.is_ascii_digit() => s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')),
        _ => false,
    }
}

// ----------------------------------------------------------------------------
// Assembly line

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asm {
    At(Addr),
    Calc(Dest, Comp, Jump),
    Label(String),
    Comment(String),
}

impl Asm {
    pub fn at(value: u16) -> Asm {
        Asm::At(Addr::Value(value))
    }

    pub fn sym(name: impl Into<String>) -> Asm {
        Asm::At(Addr::Symbol(name.into()))
    }

    pub fn reg(reg: Reg) -> Asm {
        Asm::sym(reg.to_string())
    }

    pub fn set(dest: Dest, comp: Comp) -> Asm {
        Asm::Calc(dest, comp, Jump::Null)
    }

    pub fn jump(comp: Comp, jump: Jump) -> Asm {
        Asm::Calc(Dest::Null, comp, jump)
    }

    pub fn label(name: impl Into<String>) -> Asm {
        Asm::Label(name.into())
    }

    /// Whether the line occupies a ROM word.
    pub fn is_inst(&self) -> bool {
        matches!(self, Asm::At(_) | Asm::Calc(..))
    }
}

impl Asm {
    /// Parse one line of assembly text. Blank and comment-only lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Asm>, String> {
        let code = match line.split_once("//") {
            Some((code, _)) => code,
            None => line,
        };
        let code: String = code.split_whitespace().collect();
        if code.is_empty() {
            return Ok(None);
        }

        if let Some(addr) = code.strip_prefix('@') {
            return Ok(Some(Asm::At(Addr::parse(addr)?)));
        }

        if let Some(inner) = code.strip_prefix('(') {
            return match inner.strip_suffix(')') {
                Some(name) if is_symbol(name) => Ok(Some(Asm::Label(name.to_string()))),
                _ => Err(format!("Invalid label: `{code}`")),
            };
        }

        let (dest, rest) = match code.split_once('=') {
            Some((dest, rest)) => (Dest::parse(dest)?, rest),
            None => (Dest::Null, code.as_str()),
        };
        let (comp, jump) = match rest.split_once(';') {
            Some((comp, jump)) => (Comp::parse(comp)?, Jump::parse(jump)?),
            None => (Comp::parse(rest)?, Jump::Null),
        };
        Ok(Some(Asm::Calc(dest, comp, jump)))
    }
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asm::At(addr) => write!(f, "@{}", addr),
            Asm::Calc(dest, comp, jump) => {
                if *dest != Dest::Null {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if *jump != Jump::Null {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            Asm::Label(name) => write!(f, "({})", name),
            Asm::Comment(text) => write!(f, "// {}", text),
        }
    }
}

impl Asm {
    pub fn cformat(&self) -> String {
        match self {
            Asm::At(Addr::Value(v)) => cformat!("<b>@</><y>{}</>", v),
            Asm::At(Addr::Symbol(s)) => cformat!("<b>@</><g>{}</>", s),
            Asm::Calc(dest, comp, jump) => {
                let dest = match dest {
                    Dest::Null => String::new(),
                    _ => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump {
                    Jump::Null => String::new(),
                    _ => cformat!(";<r>{}</>", jump),
                };
                format!("{}{}{}", dest, comp, jump)
            }
            Asm::Label(name) => cformat!("<g,s>({})</>", name),
            Asm::Comment(text) => cformat!("<dim>// {}</>", text),
        }
    }
}
