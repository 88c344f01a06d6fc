use arch::{
    alu::Comp,
    asm::{Asm, Dest, Jump, IMM_MAX},
    reg::{self, Reg},
};

use crate::{
    error::Error,
    label::Labels,
    parser::{Arith, Command, Direction, Segment},
};

// ----------------------------------------------------------------------------
// Stack protocol

/// `*SP = D; SP++`
fn push_d() -> Vec<Asm> {
    vec![
        Asm::reg(Reg::SP),
        Asm::set(Dest::A, Comp::M),
        Asm::set(Dest::M, Comp::D),
        Asm::reg(Reg::SP),
        Asm::set(Dest::M, Comp::MPlusOne),
    ]
}

/// `SP--; D = *SP`
fn pop_d() -> Vec<Asm> {
    vec![
        Asm::reg(Reg::SP),
        Asm::set(Dest::AM, Comp::MMinusOne),
        Asm::set(Dest::D, Comp::M),
    ]
}

/// Leaves `A` pointing at the top cell.
fn top() -> Vec<Asm> {
    vec![Asm::reg(Reg::SP), Asm::set(Dest::A, Comp::MMinusOne)]
}

/// Pops `y` into `D` and leaves `A` pointing at `x`.
fn pop_operands() -> Vec<Asm> {
    let mut code = pop_d();
    code.push(Asm::set(Dest::A, Comp::AMinusOne));
    code
}

// ----------------------------------------------------------------------------
// Arithmetic

pub fn arith(op: Arith, labels: &mut Labels) -> Vec<Asm> {
    match op {
        Arith::Add => binary(Comp::DPlusM),
        Arith::Sub => binary(Comp::MMinusD),
        Arith::And => binary(Comp::DAndM),
        Arith::Or => binary(Comp::DOrM),
        Arith::Neg => unary(Comp::NegM),
        Arith::Not => unary(Comp::NotM),
        Arith::Eq => compare(Jump::JEQ, labels),
        Arith::Gt => compare(Jump::JGT, labels),
        Arith::Lt => compare(Jump::JLT, labels),
    }
}

fn binary(comp: Comp) -> Vec<Asm> {
    let mut code = pop_operands();
    code.push(Asm::set(Dest::M, comp));
    code
}

fn unary(comp: Comp) -> Vec<Asm> {
    let mut code = top();
    code.push(Asm::set(Dest::M, comp));
    code
}

fn compare(jump: Jump, labels: &mut Labels) -> Vec<Asm> {
    let pair = labels.pair();
    let mut code = pop_operands();
    code.extend([
        Asm::set(Dest::D, Comp::MMinusD),
        Asm::sym(&pair.on_true),
        Asm::jump(Comp::D, jump),
    ]);
    code.extend(top());
    code.extend([
        Asm::set(Dest::M, Comp::Zero),
        Asm::sym(&pair.end),
        Asm::jump(Comp::Zero, Jump::JMP),
        Asm::label(&pair.on_true),
    ]);
    code.extend(top());
    code.extend([Asm::set(Dest::M, Comp::MinusOne), Asm::label(&pair.end)]);
    code
}

// ----------------------------------------------------------------------------
// Memory access

/// How a segment cell is reached.
enum Access {
    /// The index itself, loaded as an immediate.
    Constant(Asm),
    /// Base address held in a register, offset by the index.
    Pointer(Reg, Asm),
    /// A cell with a known address or symbol.
    Fixed(Asm),
}

fn access(segment: Segment, index: u16, unit: Option<&str>) -> Result<Access, Error> {
    match segment {
        Segment::Constant => match imm(0, index) {
            Ok(asm) => Ok(Access::Constant(asm)),
            Err(_) => Err(Error::ConstantOutOfRange(index)),
        },
        Segment::Local => Ok(Access::Pointer(Reg::LCL, imm(0, index)?)),
        Segment::Argument => Ok(Access::Pointer(Reg::ARG, imm(0, index)?)),
        Segment::This => Ok(Access::Pointer(Reg::THIS, imm(0, index)?)),
        Segment::That => Ok(Access::Pointer(Reg::THAT, imm(0, index)?)),
        Segment::Temp => Ok(Access::Fixed(imm(reg::TEMP, index)?)),
        Segment::Pointer => Ok(Access::Fixed(imm(reg::POINTER, index)?)),
        Segment::Static => match unit {
            Some(unit) => Ok(Access::Fixed(Asm::sym(static_symbol(unit, index)))),
            None => Err(Error::MissingUnitName),
        },
    }
}

/// `@base+index`, if it fits in an address instruction.
fn imm(base: u16, index: u16) -> Result<Asm, Error> {
    match base.checked_add(index) {
        Some(addr) if addr <= IMM_MAX => Ok(Asm::at(addr)),
        _ => Err(Error::IndexOutOfRange(index)),
    }
}

/// Symbol of a `static` cell, private to its source unit.
pub fn static_symbol(unit: &str, index: u16) -> String {
    format!("{}.{}", unit, index)
}

pub fn memory(
    dir: Direction,
    segment: Segment,
    index: u16,
    unit: Option<&str>,
) -> Result<Vec<Asm>, Error> {
    match (dir, segment) {
        (Direction::Pop, Segment::Constant) => Err(Error::PopConstant),
        (Direction::Push, _) => push(access(segment, index, unit)?),
        (Direction::Pop, _) => pop(access(segment, index, unit)?),
    }
}

fn push(access: Access) -> Result<Vec<Asm>, Error> {
    let mut code = match access {
        Access::Constant(value) => vec![value, Asm::set(Dest::D, Comp::A)],
        Access::Pointer(reg, offset) => vec![
            offset,
            Asm::set(Dest::D, Comp::A),
            Asm::reg(reg),
            Asm::set(Dest::A, Comp::DPlusM),
            Asm::set(Dest::D, Comp::M),
        ],
        Access::Fixed(addr) => vec![addr, Asm::set(Dest::D, Comp::M)],
    };
    code.extend(push_d());
    Ok(code)
}

fn pop(access: Access) -> Result<Vec<Asm>, Error> {
    match access {
        Access::Constant(_) => Err(Error::PopConstant),
        Access::Pointer(reg, offset) => {
            // Destination goes to the scratch cell before D is reused for the value
            let mut code = vec![
                offset,
                Asm::set(Dest::D, Comp::A),
                Asm::reg(reg),
                Asm::set(Dest::D, Comp::DPlusM),
                Asm::sym(reg::rname(reg::SCRATCH)),
                Asm::set(Dest::M, Comp::D),
            ];
            code.extend(pop_d());
            code.extend([
                Asm::sym(reg::rname(reg::SCRATCH)),
                Asm::set(Dest::A, Comp::M),
                Asm::set(Dest::M, Comp::D),
            ]);
            Ok(code)
        }
        Access::Fixed(addr) => {
            let mut code = pop_d();
            code.extend([addr, Asm::set(Dest::M, Comp::D)]);
            Ok(code)
        }
    }
}

// ----------------------------------------------------------------------------
// Translation run

/// Translates the commands of one source unit, owning its label counter.
#[derive(Debug, Default)]
pub struct Translator {
    unit: Option<String>,
    labels: Labels,
}

impl Translator {
    pub fn new(unit: Option<&str>) -> Self {
        Translator {
            unit: unit.map(str::to_string),
            labels: Labels::new(),
        }
    }

    /// Start a new source unit: switch the static namespace and restart labels.
    pub fn begin(&mut self, unit: Option<&str>) {
        self.unit = unit.map(str::to_string);
        self.labels.reset();
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn command(&mut self, cmd: &Command) -> Result<Vec<Asm>, Error> {
        match *cmd {
            Command::Arith(op) => Ok(arith(op, &mut self.labels)),
            Command::Memory(dir, segment, index) => {
                memory(dir, segment, index, self.unit.as_deref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(code: &[Asm]) -> Vec<String> {
        code.iter().map(|asm| asm.to_string()).collect()
    }

    #[test]
    fn test_add() {
        let code = arith(Arith::Add, &mut Labels::new());
        assert_eq!(text(&code), ["@SP", "AM=M-1", "D=M", "A=A-1", "M=D+M"]);
    }

    #[test]
    fn test_not() {
        let code = arith(Arith::Not, &mut Labels::new());
        assert_eq!(text(&code), ["@SP", "A=M-1", "M=!M"]);
    }

    #[test]
    fn test_eq() {
        let code = arith(Arith::Eq, &mut Labels::new());
        assert_eq!(
            text(&code),
            [
                "@SP", "AM=M-1", "D=M", "A=A-1", "D=M-D", "@TRUE$1", "D;JEQ", "@SP", "A=M-1",
                "M=0", "@END$1", "0;JMP", "(TRUE$1)", "@SP", "A=M-1", "M=-1", "(END$1)",
            ]
        );
    }

    #[test]
    fn test_push_constant() {
        let code = memory(Direction::Push, Segment::Constant, 17, None).unwrap();
        assert_eq!(
            text(&code),
            ["@17", "D=A", "@SP", "A=M", "M=D", "@SP", "M=M+1"]
        );
    }

    #[test]
    fn test_push_local() {
        let code = memory(Direction::Push, Segment::Local, 3, None).unwrap();
        assert_eq!(
            text(&code),
            ["@3", "D=A", "@LCL", "A=D+M", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1"]
        );
    }

    #[test]
    fn test_pop_that() {
        let code = memory(Direction::Pop, Segment::That, 5, None).unwrap();
        assert_eq!(
            text(&code),
            [
                "@5", "D=A", "@THAT", "D=D+M", "@R13", "M=D", "@SP", "AM=M-1", "D=M", "@R13",
                "A=M", "M=D",
            ]
        );
    }

    #[test]
    fn test_temp_pointer() {
        let code = memory(Direction::Pop, Segment::Temp, 6, None).unwrap();
        assert_eq!(text(&code), ["@SP", "AM=M-1", "D=M", "@11", "M=D"]);
        let code = memory(Direction::Push, Segment::Pointer, 1, None).unwrap();
        assert_eq!(text(&code)[..2], ["@4", "D=M"]);
    }

    #[test]
    fn test_static() {
        let code = memory(Direction::Push, Segment::Static, 2, Some("Foo")).unwrap();
        assert_eq!(text(&code)[..2], ["@Foo.2", "D=M"]);
        let code = memory(Direction::Pop, Segment::Static, 0, Some("Bar")).unwrap();
        assert_eq!(text(&code)[3..], ["@Bar.0", "M=D"]);
    }

    #[test]
    fn test_static_without_unit() {
        let res = memory(Direction::Push, Segment::Static, 2, None);
        assert!(matches!(res, Err(Error::MissingUnitName)));
        let res = memory(Direction::Pop, Segment::Static, 2, None);
        assert!(matches!(res, Err(Error::MissingUnitName)));
    }

    #[test]
    fn test_index_range() {
        let res = memory(Direction::Push, Segment::Local, 32768, None);
        assert!(matches!(res, Err(Error::IndexOutOfRange(32768))));
        let res = memory(Direction::Pop, Segment::Temp, 32765, None);
        assert!(matches!(res, Err(Error::IndexOutOfRange(32765))));
        let res = memory(Direction::Push, Segment::Constant, 40000, None);
        assert!(matches!(res, Err(Error::ConstantOutOfRange(40000))));
        assert!(memory(Direction::Push, Segment::Static, 40000, Some("Foo")).is_ok());
    }

    #[test]
    fn test_pop_constant() {
        let res = memory(Direction::Pop, Segment::Constant, 2, Some("Foo"));
        assert!(matches!(res, Err(Error::PopConstant)));
    }

    #[test]
    fn test_translator_begin() {
        let mut tr = Translator::new(Some("Foo"));
        let eq = Command::Arith(Arith::Eq);
        tr.command(&eq).unwrap();
        tr.command(&eq).unwrap();
        tr.begin(Some("Bar"));
        assert_eq!(tr.unit(), Some("Bar"));
        let code = tr.command(&eq).unwrap();
        assert!(code.contains(&Asm::label("TRUE$1")));
    }
}
