use crate::ir;

// Precedence among overlapping patterns. None of this is an error: tables
// are allowed to overlap, the dispatcher decides who wins.

/// Some word satisfies both patterns.
pub fn overlaps(a: &ir::MatchPattern, b: &ir::MatchPattern) -> bool {
    (a.value ^ b.value) & a.mask & b.mask == 0
}

/// Every word matching `a` also matches `b`, and `a` pins strictly more bits.
pub fn is_more_specific(a: &ir::MatchPattern, b: &ir::MatchPattern) -> bool {
    a.mask != b.mask
        && a.mask & b.mask == b.mask
        && a.value & b.mask == b.value
}

/// Most constrained first, table order among equals. A first-match scan
/// over the result picks the most specific handler.
pub fn order_by_specificity<'a>(instructions: &[&'a ir::Instruction]) -> Vec<&'a ir::Instruction> {
    let mut ordered = instructions.to_vec();
    ordered.sort_by(|a, b| b.pattern.constrained_bits().cmp(&a.pattern.constrained_bits()));
    ordered
}

/// Overlapping pairs where neither side wins by specificity.
pub fn ambiguous_pairs<'a>(instructions: &[&'a ir::Instruction]) -> Vec<(&'a ir::Instruction, &'a ir::Instruction)> {
    let mut pairs = Vec::new();

    for (ndx, a) in instructions.iter().enumerate() {
        for b in &instructions[ndx + 1..] {
            if !overlaps(&a.pattern, &b.pattern) {
                continue;
            }

            if is_more_specific(&a.pattern, &b.pattern) || is_more_specific(&b.pattern, &a.pattern) {
                continue;
            }

            pairs.push((*a, *b));
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Instruction, MatchPattern};

    fn inst(name: &str, mask: u32, value: u32) -> Instruction {
        Instruction {
            format: name.into(),
            mnemonic: name.into(),
            bits: Box::new([]),
            pattern: MatchPattern { mask, value },
            id: name.into(),
        }
    }

    #[test]
    fn test_overlaps() {
        let add = MatchPattern { mask: 0xFC00, value: 0x0C00 };
        let adc = MatchPattern { mask: 0xFC00, value: 0x1C00 };
        let any = MatchPattern::default();
        assert!(!overlaps(&add, &adc));
        assert!(overlaps(&add, &any));
        assert!(overlaps(&add, &add));
    }

    #[test]
    fn test_is_more_specific() {
        let nop = MatchPattern { mask: 0xFFFF, value: 0 };
        let cpc_like = MatchPattern { mask: 0xF000, value: 0 };
        assert!(is_more_specific(&nop, &cpc_like));
        assert!(!is_more_specific(&cpc_like, &nop));
        assert!(!is_more_specific(&nop, &nop));

        // Disagrees on a shared bit.
        let other = MatchPattern { mask: 0xFFFF, value: 0x1000 };
        assert!(!is_more_specific(&other, &cpc_like));
    }

    #[test]
    fn test_order_by_specificity_is_stable() {
        let a = inst("A", 0xF000, 0x1000);
        let b = inst("B", 0xFFFF, 0x0000);
        let c = inst("C", 0xF000, 0x2000);
        let d = inst("D", 0, 0);

        let ordered = order_by_specificity(&[&d, &a, &b, &c]);
        let names = ordered.iter().map(|i| i.format.as_ref()).collect::<Vec<_>>();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_ambiguous_pairs() {
        let eor = inst("EOR", 0xFC00, 0x2400);
        let clr = inst("CLR", 0xFC00, 0x2400);
        let nop = inst("NOP", 0xFFFF, 0x0000);
        // Overlap, neither contains the other.
        let skew_a = inst("SA", 0xFF00, 0x0100);
        let skew_b = inst("SB", 0x0FF0, 0x0100);

        let pairs = ambiguous_pairs(&[&eor, &clr, &nop, &skew_a, &skew_b]);
        let names = pairs.iter().map(|(a, b)| (a.id.as_ref(), b.id.as_ref())).collect::<Vec<_>>();
        assert_eq!(names, vec![("EOR", "CLR"), ("SA", "SB")]);
    }
}
