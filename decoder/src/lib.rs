//! AVR8 instruction recognition backed by a table generated at build time
//! from `tables/avr8.xml`.

use isa_gen_nostd::Opcode;

pub mod _generated {
    #![allow(non_camel_case_types)]

    core::include!(core::concat!(env!("OUT_DIR"), "/avr8.rs"));
}

pub use _generated::{Mnemonic, MNEMONICS, MNEMONIC_NAMES, OPCODES};

/// Table entry handling `word`, if any.
#[inline]
pub fn decode(word: u16) -> Option<&'static Opcode> {
    isa_gen_nostd::find(&OPCODES, word as u32)
}

/// `Mnemonic::Unknown` when no entry matches.
pub fn mnemonic(word: u16) -> Mnemonic {
    decode(word)
        .map(|op| MNEMONICS[op.mnemonic as usize])
        .unwrap_or(Mnemonic::Unknown)
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        MNEMONIC_NAMES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_words() {
        let cases: &[(u16, &str)] = &[
            (0x0000, "NOP"),
            // add r1, r2
            (0x0C12, "ADD Rd,Rr"),
            (0x9508, "RET"),
            (0x9518, "RETI"),
            // ldi r16, 0xff
            (0xEF0F, "LDI Rd,K"),
            // push r16 / pop r16
            (0x930F, "PUSH Rr"),
            (0x910F, "POP Rd"),
            // rjmp .-2
            (0xCFFF, "RJMP k"),
            // ld r24, X+
            (0x918D, "LD Rd,X+"),
            // ldd r24, Y+1
            (0x8189, "LDD Rd,Y+q"),
            // std Z+2, r24
            (0x8382, "STD Z+q,Rr"),
            // out 0x3f, r0
            (0xBE0F, "OUT A,Rr"),
            // movw r24, r30
            (0x01CF, "MOVW Rd,Rr"),
            // sbi 0x05, 5
            (0x9A2D, "SBI A,b"),
            // bset 7 (sei)
            (0x9478, "BSET s"),
            (0x9409, "IJMP"),
        ];

        for (word, format) in cases {
            let op = decode(*word).unwrap_or_else(|| panic!("{word:04x} not decoded"));
            assert_eq!(op.format, *format, "{word:04x}");
            assert!(op.matches(*word as u32));
        }
    }

    #[test]
    fn test_unknown_word() {
        assert!(decode(0xFFFF).is_none());
        assert_eq!(mnemonic(0xFFFF), Mnemonic::Unknown);
        assert_eq!(Mnemonic::Unknown.name(), "Unknown");
    }

    #[test]
    fn test_mnemonic_lookup() {
        assert_eq!(mnemonic(0x0C12), Mnemonic::Add);
        assert_eq!(mnemonic(0x918D), Mnemonic::Ld);
        assert_eq!(mnemonic(0x8189), Mnemonic::Ldd);
        assert_eq!(Mnemonic::Eicall.name(), "Eicall");
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(MNEMONICS[0], Mnemonic::Unknown);
        assert_eq!(MNEMONICS.len(), MNEMONIC_NAMES.len());
        assert!(OPCODES.iter().all(|op| op.value & !op.mask == 0));
        assert!(OPCODES.iter().all(|op| op.mnemonic != Opcode::UNKNOWN_MNEMONIC));
        assert!(OPCODES.windows(2).all(|w| w[0].mask.count_ones() >= w[1].mask.count_ones()));
    }

    #[test]
    fn test_handler_names_are_unique() {
        let mut names = OPCODES.iter().map(|op| op.handler).collect::<Vec<_>>();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), OPCODES.len());
    }
}
