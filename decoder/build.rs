use std::env;
use std::fs;
use std::path::Path;

use isa_gen::config::GeneratorConfig;
use isa_gen::emitter::strategies::table::TableEmitter;
use isa_gen::emitter::traits::CodeEmitter;

const TABLE: &str = "tables/avr8.xml";

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("avr8.rs");

    let table = isa_gen::parser::avr8::parse_file(TABLE)
        .expect("Instruction table could not be loaded");
    let config = GeneratorConfig::default().with_table(&table);
    let generated = isa_gen::generate(table, config)
        .expect("Instruction table is malformed");

    let analysis = &generated.analysis;
    let tokens = TableEmitter.emit(&analysis.instructions, &analysis.mnemonics);

    let syntax_tree = syn::parse2(tokens)
        .expect("Generated code is not valid Rust");

    fs::write(
        &dest_path,
        prettyplease::unparse(&syntax_tree)
    ).unwrap();

    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed={TABLE}");
}
