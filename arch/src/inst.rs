use crate::{
    alu::Comp,
    asm::{Dest, Jump},
};

use color_print::cformat;

/// An instruction with every symbol resolved to an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    At(u16),
    Calc(Dest, Comp, Jump),
}

impl Inst {
    /// Encode to a 16-bit machine word.
    pub fn to_bin(self) -> u16 {
        match self {
            Inst::At(v) => v & 0x7FFF,
            Inst::Calc(dest, comp, jump) => {
                let a = comp.reads_m() as u16;
                let dest = (dest.a() as u16) << 2 | (dest.d() as u16) << 1 | dest.m() as u16;
                0b111 << 13 | a << 12 | (comp_bits(comp) as u16) << 6 | dest << 3 | jump_bits(jump)
            }
        }
    }
}

fn comp_bits(comp: Comp) -> u8 {
    use Comp::*;
    match comp {
        Zero => 0b101010,
        One => 0b111111,
        MinusOne => 0b111010,
        D => 0b001100,
        A | M => 0b110000,
        NotD => 0b001101,
        NotA | NotM => 0b110001,
        NegD => 0b001111,
        NegA | NegM => 0b110011,
        DPlusOne => 0b011111,
        APlusOne | MPlusOne => 0b110111,
        DMinusOne => 0b001110,
        AMinusOne | MMinusOne => 0b110010,
        DPlusA | DPlusM => 0b000010,
        DMinusA | DMinusM => 0b010011,
        AMinusD | MMinusD => 0b000111,
        DAndA | DAndM => 0b000000,
        DOrA | DOrM => 0b010101,
    }
}

fn jump_bits(jump: Jump) -> u16 {
    match jump {
        Jump::Null => 0b000,
        Jump::JGT => 0b001,
        Jump::JEQ => 0b010,
        Jump::JGE => 0b011,
        Jump::JLT => 0b100,
        Jump::JNE => 0b101,
        Jump::JLE => 0b110,
        Jump::JMP => 0b111,
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::At(v) => cformat!("<b>@</><y>0x{:0>4X}</>", v),
            Inst::Calc(dest, comp, jump) => cformat!(
                "<b>{:<4}</><r>{:<4}</><c>{:<3}</>",
                dest.to_string(),
                comp.to_string(),
                jump.to_string()
            ),
        }
    }
}
