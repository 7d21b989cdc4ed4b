//! Derives, for every entry of a fixed-width instruction table, the match
//! mask and value a disassembler tests words against, the entry's mnemonic,
//! and a unique name for its decoder routine.
//!
//! ```ignore
//! let table = isa_gen::parser::avr8::parse_file("tables/avr8.xml")?;
//! let generated = isa_gen::generate(table, isa_gen::config::GeneratorConfig::default())?;
//! for inst in &generated.analysis.instructions {
//!     println!("{} {:04x}/{:04x}", inst.id, inst.pattern.mask, inst.pattern.value);
//! }
//! ```

pub mod config;
pub mod emitter;
pub mod ir;
pub mod parser;

use config::{ConfigError, GeneratorConfig};
use emitter::{bits, classification, identifier};
use emitter::identifier::MnemonicSet;
use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] parser::avr8::ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Instruction(#[from] ir::Error),
}

/// Result of analyzing a whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Table order.
    pub instructions: Vec<ir::Instruction>,
    pub mnemonics: MnemonicSet,
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub name: Box<str>,
    pub config: GeneratorConfig,
    pub analysis: Analysis,
}

fn fingerprint(definition: &ir::InstructionDefinition, config: &GeneratorConfig) -> Result<ir::Instruction, ir::Error> {
    let normalized = ir::normalize::normalize_checked(definition, config.word_width)?;

    let mnemonic = bits::mnemonic(definition)?;
    let pattern = bits::compute_match(&normalized);
    let id = identifier::dispatch_id(mnemonic, pattern, config.id_hex_digits);

    debug!("{}: {} -> {id}", bits::get_key_for_pattern(&normalized), definition.format);

    Ok(ir::Instruction {
        format: definition.format.clone(),
        mnemonic: Box::from(mnemonic),
        bits: normalized,
        pattern,
        id: id.into(),
    })
}

/// Normalizes, verifies and fingerprints one definition. The width check
/// runs before anything is derived.
pub fn analyze_instruction(definition: &ir::InstructionDefinition, config: &GeneratorConfig) -> Result<ir::Instruction, GenerateError> {
    config.validate()?;
    Ok(fingerprint(definition, config)?)
}

/// Analyzes every definition, stopping at the first bad one.
///
/// `mnemonics` is extended and handed back; on error it is dropped along
/// with everything else so a failed run leaves nothing behind.
pub fn analyze(definitions: &[ir::InstructionDefinition], config: &GeneratorConfig, mut mnemonics: MnemonicSet) -> Result<Analysis, GenerateError> {
    config.validate()?;

    let mut instructions = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let instruction = fingerprint(definition, config)?;
        mnemonics.register(&instruction.mnemonic);
        instructions.push(instruction);
    }

    let refs = instructions.iter().collect::<Vec<_>>();
    for (a, b) in classification::ambiguous_pairs(&refs) {
        warn!("{} and {} match the same words", a.id, b.id);
    }

    info!(
        "analyzed {} instructions, {} distinct mnemonics",
        instructions.len(),
        mnemonics.len()
    );

    Ok(Analysis {
        instructions,
        mnemonics,
    })
}

/// Analyzes `table` with `config`.
pub fn generate(table: parser::avr8::Table, config: GeneratorConfig) -> Result<Generated, GenerateError> {
    let analysis = analyze(&table.instructions, &config, MnemonicSet::new())?;

    Ok(Generated {
        name: table.name,
        config,
        analysis,
    })
}
