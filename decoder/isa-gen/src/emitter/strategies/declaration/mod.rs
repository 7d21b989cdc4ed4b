use crate::config::GeneratorConfig;
use crate::GenerateError;
use crate::emitter::identifier::{MnemonicSet, canonicalize};
use crate::emitter::traits::CodeEmitter;
use crate::ir;

use std::fmt::Write;

/// Where the declarations end up in the consumer's source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Inside the architecture type body.
    InBody,
    /// At namespace scope, names qualified with the configured scope.
    OutOfBody,
}

/// Mnemonic table declaration plus one handler prototype per instruction.
pub struct DeclarationEmitter<'a> {
    pub config: &'a GeneratorConfig,
    pub placement: Placement,
}

impl<'a> DeclarationEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig, placement: Placement) -> Self {
        Self { config, placement }
    }

    fn qualifier(&self) -> String {
        match (self.placement, &self.config.scope) {
            (Placement::OutOfBody, Some(scope)) => format!("{scope}::"),
            _ => String::new(),
        }
    }

    pub fn table_declaration(&self, mnemonics: &MnemonicSet) -> String {
        let storage = match self.placement {
            Placement::InBody => "static ",
            Placement::OutOfBody => "",
        };

        format!(
            "{storage}char const *{}{}[{:#x}];",
            self.qualifier(),
            self.config.mnemonic_table,
            mnemonics.table_len()
        )
    }

    pub fn prototype(&self, instruction: &ir::Instruction) -> String {
        let signature = &self.config.signature;
        format!(
            "bool {}{}({}, {}, {} {}, {});",
            self.qualifier(),
            instruction.id,
            signature.stream,
            signature.offset,
            self.config.opcode_type(),
            signature.opcode_name,
            signature.record
        )
    }
}

impl CodeEmitter for DeclarationEmitter<'_> {
    type Output = String;

    fn emit(&self, instructions: &[ir::Instruction], mnemonics: &MnemonicSet) -> String {
        let mut sorted = instructions.iter().collect::<Vec<_>>();
        // Same order as the mnemonic table. Stable, so equal mnemonics keep
        // table order.
        sorted.sort_by_cached_key(|inst| canonicalize(&inst.mnemonic));

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.table_declaration(mnemonics));
        for instruction in sorted {
            let _ = writeln!(out, "{}", self.prototype(instruction));
        }
        out
    }
}

/// Full declaration text for `definitions`, in-body form.
///
/// Nothing is rendered unless every definition analyzes cleanly. The
/// mnemonic set comes back extended with this table's mnemonics.
pub fn declaration_surface(
    definitions: &[ir::InstructionDefinition],
    config: &GeneratorConfig,
    mnemonics: MnemonicSet,
) -> Result<(String, MnemonicSet), GenerateError> {
    let analysis = crate::analyze(definitions, config, mnemonics)?;
    let text = DeclarationEmitter::new(config, Placement::InBody).emit(&analysis.instructions, &analysis.mnemonics);
    Ok((text, analysis.mnemonics))
}
