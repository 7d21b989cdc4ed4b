#![no_std]

/// One row of a generated dispatch table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub mask: u32,
    pub value: u32,
    /// Slot in the generated mnemonic table; 0 is reserved for unknown words.
    pub mnemonic: u16,
    pub handler: &'static str,
    pub format: &'static str,
}

impl Opcode {
    pub const UNKNOWN_MNEMONIC: u16 = 0;

    #[inline(always)]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.value
    }
}

/// First entry of `table` matching `word`. Generated tables put the most
/// specific patterns first.
#[inline]
pub fn find(table: &[Opcode], word: u32) -> Option<&Opcode> {
    table.iter().find(|op| op.matches(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [Opcode; 3] = [
        Opcode { mask: 0xFFFF, value: 0x0000, mnemonic: 2, handler: "NOP_0000ffff_00000000", format: "NOP" },
        Opcode { mask: 0xFC00, value: 0x0C00, mnemonic: 1, handler: "ADD_0000fc00_00000c00", format: "ADD Rd,Rr" },
        Opcode { mask: 0x0000, value: 0x0000, mnemonic: 3, handler: "ANY_00000000_00000000", format: "ANY" },
    ];

    #[test]
    fn test_matches() {
        assert!(TABLE[1].matches(0x0C12));
        assert!(!TABLE[1].matches(0x1C12));
        assert!(TABLE[2].matches(0xFFFF));
    }

    #[test]
    fn test_find_takes_first_match() {
        assert_eq!(find(&TABLE, 0x0000).map(|op| op.format), Some("NOP"));
        assert_eq!(find(&TABLE, 0x0C12).map(|op| op.format), Some("ADD Rd,Rr"));
        assert_eq!(find(&TABLE, 0x1234).map(|op| op.format), Some("ANY"));
        assert_eq!(find(&TABLE[..2], 0x1234), None);
    }
}
