// One variant per canonical mnemonic, `Unknown` first so that slot 0 is the
// unmatched-word sentinel. Discriminants line up with `MnemonicSet::slot`.

use crate::emitter::identifier::MnemonicSet;

use quote::{format_ident, quote};
use proc_macro2::{Ident, TokenStream};

pub fn variant(name: &str) -> Ident {
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format_ident!("_{}", name),
        _ if name == "Self" => format_ident!("Self_"),
        _ if name == "Unknown" => format_ident!("Unknown_"),
        _ => format_ident!("{}", name),
    }
}

pub fn variants(mnemonics: &MnemonicSet) -> Vec<Ident> {
    std::iter::once(format_ident!("Unknown"))
        .chain(mnemonics.iter().map(variant))
        .collect()
}

pub fn emit(mnemonics: &MnemonicSet) -> TokenStream {
    let members = variants(mnemonics);
    let names = std::iter::once("Unknown").chain(mnemonics.iter());
    let len = mnemonics.table_len();

    quote! {
        #[repr(u16)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Mnemonic {
            #(#members),*
        }

        pub static MNEMONICS: [Mnemonic; #len] = [
            #(Mnemonic::#members),*
        ];

        pub static MNEMONIC_NAMES: [&str; #len] = [
            #(#names),*
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(variant("Add").to_string(), "Add");
        assert_eq!(variant("12ldi").to_string(), "_12ldi");
        assert_eq!(variant("Self").to_string(), "Self_");
        assert_eq!(variant("Unknown").to_string(), "Unknown_");
    }

    #[test]
    fn test_table_mnemonic_named_unknown() {
        let mut set = MnemonicSet::new();
        set.register("UNKNOWN");

        let names = variants(&set).iter().map(|v| v.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Unknown", "Unknown_"]);

        let file: syn::File = syn::parse2(emit(&set)).unwrap();
        assert!(prettyplease::unparse(&file).contains("Unknown_"));
    }

    #[test]
    fn test_sentinel_is_first() {
        let mut set = MnemonicSet::new();
        set.register("RET");
        set.register("ADD");

        let names = variants(&set).iter().map(|v| v.to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Unknown", "Add", "Ret"]);
    }
}
