pub mod normalize;

use thiserror::Error;

/// State one position of an instruction word must have.
///
/// Tables may spell constrained bits in more than one notation; they all
/// collapse into `Zero`/`One` here.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
    Free,
}

impl Bit {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '0' => Bit::Zero,
            '1' => Bit::One,
            _ => Bit::Free,
        }
    }

    pub fn is_constrained(self) -> bool {
        !matches!(self, Bit::Free)
    }
}

/// Encoding as written in the source table, grouping preserved.
/// Symbols are kept so operand letters survive into diagnostics.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RawEncoding {
    Symbol(char),
    Group(Box<[RawEncoding]>),
}

impl RawEncoding {
    pub fn group(items: impl Into<Box<[RawEncoding]>>) -> Self {
        RawEncoding::Group(items.into())
    }

    /// Flat `Group` of symbols, e.g. `RawEncoding::bits("0000 11rd")`.
    /// Whitespace is skipped.
    pub fn bits(text: &str) -> Self {
        RawEncoding::Group(
            text.chars()
                .filter(|c| !c.is_whitespace())
                .map(RawEncoding::Symbol)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InstructionDefinition {
    pub format: Box<str>,
    pub encoding: RawEncoding,
}

impl InstructionDefinition {
    pub fn new(format: &str, encoding: RawEncoding) -> Self {
        Self {
            format: Box::from(format),
            encoding,
        }
    }
}

/// `(word & mask) == value` selects the instruction.
///
/// Bit 0 is the least significant bit, i.e. the last specifier of the
/// encoding. `value` never has a bit outside `mask`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatchPattern {
    pub mask: u32,
    pub value: u32,
}

impl MatchPattern {
    #[inline(always)]
    pub fn matches(&self, word: u32) -> bool {
        word & self.mask == self.value
    }

    pub fn constrained_bits(&self) -> u32 {
        self.mask.count_ones()
    }
}

/// Everything derived for one table entry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Instruction {
    pub format: Box<str>,
    pub mnemonic: Box<str>,
    pub bits: Box<[Bit]>,
    pub pattern: MatchPattern,
    pub id: Box<str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid instruction \"{format}\", encoding: {encoding}, length: {length}")]
    MalformedEncoding {
        format: Box<str>,
        encoding: Box<str>,
        length: usize,
    },
    #[error("instruction format \"{format}\" (encoding: {encoding}) does not start with a mnemonic")]
    EmptyMnemonic {
        format: Box<str>,
        encoding: Box<str>,
    },
}
