use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use isa_gen::config::GeneratorConfig;
use isa_gen::emitter::strategies::declaration::{DeclarationEmitter, Placement};
use isa_gen::emitter::strategies::table::TableEmitter;
use isa_gen::emitter::traits::CodeEmitter;

/// Generates decoder dispatch declarations from an instruction table.
#[derive(Parser, Debug)]
#[command(name = "isa-gen", version, about)]
struct Args {
    /// Instruction table (XML)
    table: PathBuf,

    /// Directory the generated files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Architecture type name used to qualify out-of-body prototypes
    #[arg(long)]
    scope: Option<String>,

    /// Instruction word width in bits, overriding the table header
    #[arg(long)]
    word_width: Option<usize>,

    /// Hex digits used for mask and value in handler names
    #[arg(long)]
    id_hex_digits: Option<usize>,

    /// Also write a Rust dispatch table
    #[arg(long)]
    rust: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self, table: &isa_gen::parser::avr8::Table) -> GeneratorConfig {
        let mut config = GeneratorConfig::default().with_table(table);
        if let Some(word_width) = self.word_width {
            config = config.with_word_width(word_width);
        }
        if let Some(digits) = self.id_hex_digits {
            config = config.with_id_hex_digits(digits);
        }
        if let Some(scope) = &self.scope {
            config = config.with_scope(scope.as_str());
        }
        config
    }
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let table = isa_gen::parser::avr8::parse_file(&args.table)
        .with_context(|| format!("failed to load {}", args.table.display()))?;
    info!("loaded {} instructions from {}", table.instructions.len(), args.table.display());

    let config = args.config(&table);
    let generated = isa_gen::generate(table, config)
        .with_context(|| format!("failed to generate from {}", args.table.display()))?;

    // Everything is rendered before the first file is touched.
    let analysis = &generated.analysis;
    let in_body = DeclarationEmitter::new(&generated.config, Placement::InBody)
        .emit(&analysis.instructions, &analysis.mnemonics);
    let out_of_body = DeclarationEmitter::new(&generated.config, Placement::OutOfBody)
        .emit(&analysis.instructions, &analysis.mnemonics);

    let rust = if args.rust {
        let tokens = TableEmitter.emit(&analysis.instructions, &analysis.mnemonics);
        let syntax_tree: syn::File = syn::parse2(tokens).context("generated table is not valid Rust")?;
        Some(prettyplease::unparse(&syntax_tree))
    } else {
        None
    };

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    write(&args.out_dir.join(format!("{}_decl.hpp", generated.name)), &in_body)?;
    write(&args.out_dir.join(format!("{}_decl.cpp", generated.name)), &out_of_body)?;
    if let Some(rust) = rust {
        write(&args.out_dir.join(format!("{}.rs", generated.name)), &rust)?;
    }

    Ok(())
}
