pub mod instruction;

use crate::emitter::classification;
use crate::emitter::identifier::MnemonicSet;
use crate::emitter::traits::CodeEmitter;
use crate::ir;

use quote::quote;
use proc_macro2::TokenStream;

fn emit_use() -> TokenStream {
    quote! {
        use isa_gen_nostd::Opcode;
    }
}

fn const_opcode(inst: &ir::Instruction, mnemonics: &MnemonicSet) -> TokenStream {
    let mask = inst.pattern.mask;
    let value = inst.pattern.value;
    let slot = mnemonics.slot(&inst.mnemonic).unwrap_or(0) as u16;
    let handler = inst.id.as_ref();
    let format = inst.format.as_ref();

    quote! {
        Opcode {
            mask: #mask,
            value: #value,
            mnemonic: #slot,
            handler: #handler,
            format: #format
        }
    }
}

fn emit_opcodes(instructions: &[&ir::Instruction], mnemonics: &MnemonicSet) -> TokenStream {
    let entries = instructions.iter().map(|inst| const_opcode(inst, mnemonics));
    let len = instructions.len();

    quote! {
        pub static OPCODES: [Opcode; #len] = [
            #(#entries),*
        ];
    }
}

/// Rust dispatch table for `isa_gen_nostd::find`, most specific entries
/// first.
pub struct TableEmitter;

impl CodeEmitter for TableEmitter {
    type Output = TokenStream;

    fn emit(&self, instructions: &[ir::Instruction], mnemonics: &MnemonicSet) -> TokenStream {
        let refs = instructions.iter().collect::<Vec<_>>();
        let ordered = classification::order_by_specificity(&refs);

        let usage = emit_use();
        let mnemonic_enum = instruction::emit(mnemonics);
        let opcodes = emit_opcodes(&ordered, mnemonics);

        quote! {
            #usage

            #mnemonic_enum

            #opcodes
        }
    }
}
