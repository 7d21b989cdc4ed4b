use crate::ir;
use crate::ir::normalize::render_symbols;

/// Renders a normalized encoding MSB first: `0`, `1`, or `x` per position.
pub fn get_key_for_pattern(bits: &[ir::Bit]) -> String {
    bits.iter().map(|b| match b {
        ir::Bit::One => "1",
        ir::Bit::Zero => "0",
        ir::Bit::Free => "x"
    }).collect::<Vec<_>>().concat()
}

/// Leading run of ASCII letters and digits of the definition's format.
pub fn mnemonic(definition: &ir::InstructionDefinition) -> Result<&str, ir::Error> {
    let format = definition.format.as_ref();
    let end = format
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map_or(format.len(), |(ndx, _)| ndx);

    if end == 0 {
        return Err(ir::Error::EmptyMnemonic {
            format: Box::from(format),
            encoding: render_symbols(&definition.encoding).into(),
        });
    }

    Ok(&format[..end])
}

/// Walks the encoding from its last element, which is bit 0.
pub fn compute_match(bits: &[ir::Bit]) -> ir::MatchPattern {
    debug_assert!(bits.len() <= 32);

    let mut pattern = ir::MatchPattern::default();

    for (position, bit) in bits.iter().rev().enumerate() {
        match bit {
            ir::Bit::One => {
                pattern.mask |= 1 << position;
                pattern.value |= 1 << position;
            }
            ir::Bit::Zero => {
                pattern.mask |= 1 << position;
            }
            ir::Bit::Free => {}
        }
    }

    pattern
}

/// Inverse of `compute_match` for a word of `width` bits. Operand names
/// are lost; every unconstrained position comes back as `Free`.
pub fn pattern_to_bits(pattern: ir::MatchPattern, width: usize) -> Vec<ir::Bit> {
    (0..width).rev().map(|position| {
        let bit = 1u32 << position;
        if pattern.mask & bit == 0 {
            ir::Bit::Free
        } else if pattern.value & bit != 0 {
            ir::Bit::One
        } else {
            ir::Bit::Zero
        }
    }).collect()
}
