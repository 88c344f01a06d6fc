use arch::asm::IMM_MAX;
use color_print::cformat;
use strum::{Display, EnumIter, EnumString};

use crate::error::Error;

// ----------------------------------------------------------------------------
// Line

#[derive(Debug, Clone)]
pub struct Line {
    idx: usize,
    raw: String,
    code: String,
    comment: Option<String>,
}

impl Line {
    pub fn new(idx: usize, raw: &str) -> Self {
        let (code, comment) = match raw.split_once("//") {
            Some((code, comment)) => (code.trim().to_string(), Some(comment.trim().to_string())),
            None => (raw.trim().to_string(), None),
        };
        Self {
            idx,
            raw: raw.to_string(),
            code,
            comment,
        }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    /// 1-based line number.
    pub fn no(&self) -> usize {
        self.idx + 1
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Blank and comment-only lines yield `None`.
    pub fn parse(&self) -> Result<Option<Command>, Error> {
        if self.code.is_empty() {
            return Ok(None);
        }
        Command::parse(&self.code).map(Some)
    }
}

// ----------------------------------------------------------------------------
// Command

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Arith {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Arith {
    pub fn is_comparison(&self) -> bool {
        matches!(self, Arith::Eq | Arith::Gt | Arith::Lt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Push,
    Pop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

impl Segment {
    /// Highest index the target memory map reserves for the segment.
    pub fn limit(&self) -> Option<u16> {
        match self {
            Segment::Temp => Some(7),
            Segment::Pointer => Some(1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Arith(Arith),
    Memory(Direction, Segment, u16),
}

impl Command {
    pub fn parse(code: &str) -> Result<Command, Error> {
        let words: Vec<&str> = code.split_whitespace().collect();
        let (head, args) = match words.split_first() {
            Some(split) => split,
            None => return Err(Error::MissingArgument),
        };

        // Get argument by index and parse it
        // Example: arg!(0, parse_segment) -> Segment
        macro_rules! arg {
            ($index:expr, $parse:expr) => {{
                let arg = args.get($index).ok_or(Error::MissingArgument)?;
                $parse(*arg)?
            }};
        }

        if let Ok(op) = head.parse::<Arith>() {
            if let Some(extra) = args.first() {
                return Err(Error::ExtraArgument(extra.to_string()));
            }
            return Ok(Command::Arith(op));
        }

        if let Ok(dir) = head.parse::<Direction>() {
            let segment: Segment = arg!(0, parse_segment);
            let index: u16 = arg!(1, parse_index);
            if let Some(extra) = args.get(2) {
                return Err(Error::ExtraArgument(extra.to_string()));
            }
            return match (dir, segment) {
                (Direction::Pop, Segment::Constant) => Err(Error::PopConstant),
                (Direction::Push, Segment::Constant) if index > IMM_MAX => {
                    Err(Error::ConstantOutOfRange(index))
                }
                _ => Ok(Command::Memory(dir, segment, index)),
            };
        }

        Err(Error::UnknownCommand(head.to_string()))
    }
}

fn parse_segment(s: &str) -> Result<Segment, Error> {
    s.parse::<Segment>()
        .map_err(|_| Error::UnknownSegment(s.to_string()))
}

fn parse_index(s: &str) -> Result<u16, Error> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::ParseIndex(s.to_string()));
    }
    s.parse::<u16>().map_err(|_| Error::ParseIndex(s.to_string()))
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Arith(op) => write!(f, "{}", op),
            Command::Memory(dir, segment, index) => write!(f, "{} {} {}", dir, segment, index),
        }
    }
}

impl Command {
    pub fn cformat(&self) -> String {
        match self {
            Command::Arith(op) => cformat!("<r>{:<5}</>", op.to_string()),
            Command::Memory(dir, segment, index) => cformat!(
                "<r>{:<5}</><b>{:<9}</><y>{}</>",
                dir.to_string(),
                segment.to_string(),
                index
            ),
        }
    }
}
