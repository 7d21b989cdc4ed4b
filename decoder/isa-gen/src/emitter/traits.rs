use crate::ir;
use crate::emitter::identifier::MnemonicSet;

/// Renders analyzed instructions into some target surface.
///
/// Emitters only read: the instruction list and the mnemonic set are
/// complete before any of them runs.
pub trait CodeEmitter {
    type Output;

    fn emit(&self, instructions: &[ir::Instruction], mnemonics: &MnemonicSet) -> Self::Output;
}
