use crate::parser::avr8::Table;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word width {0} is outside 1..=32")]
    WordWidth(usize),
    #[error("{digits} hex digits cannot hold a {width}-bit mask")]
    IdentifierDigits { digits: usize, width: usize },
}

/// Parameter text of the generated handler prototypes, the raw opcode aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
    pub stream: Box<str>,
    pub offset: Box<str>,
    pub opcode_name: Box<str>,
    pub record: Box<str>,
}

impl Default for HandlerSignature {
    fn default() -> Self {
        Self {
            stream: Box::from("BinaryStream const& rBinStrm"),
            offset: Box::from("TOffset Offset"),
            opcode_name: Box::from("Opcode"),
            record: Box::from("Instruction& rInsn"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub word_width: usize,
    pub id_hex_digits: usize,
    pub scope: Option<Box<str>>,
    pub mnemonic_table: Box<str>,
    pub signature: HandlerSignature,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            word_width: 16,
            // Eight digits whatever the word width.
            id_hex_digits: 8,
            scope: None,
            mnemonic_table: Box::from("m_Mnemonic"),
            signature: HandlerSignature::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=32).contains(&self.word_width) {
            return Err(ConfigError::WordWidth(self.word_width));
        }

        if self.id_hex_digits * 4 < self.word_width {
            return Err(ConfigError::IdentifierDigits {
                digits: self.id_hex_digits,
                width: self.word_width,
            });
        }

        Ok(())
    }

    /// Smallest fixed-size unsigned type holding one instruction word.
    pub fn opcode_type(&self) -> &'static str {
        match self.word_width {
            0..=8 => "u8",
            9..=16 => "u16",
            _ => "u32",
        }
    }

    /// Takes word width and scope from the table header where present.
    pub fn with_table(mut self, table: &Table) -> Self {
        if let Some(word_width) = table.word_width {
            self.word_width = word_width;
        }
        if let Some(scope) = &table.scope {
            self.scope = Some(scope.clone());
        }
        self
    }

    pub fn with_word_width(mut self, word_width: usize) -> Self {
        self.word_width = word_width;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<Box<str>>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_id_hex_digits(mut self, digits: usize) -> Self {
        self.id_hex_digits = digits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.opcode_type(), "u16");
        assert_eq!(config.id_hex_digits, 8);
    }

    #[test]
    fn test_word_width_bounds() {
        assert_eq!(GeneratorConfig::default().with_word_width(0).validate(), Err(ConfigError::WordWidth(0)));
        assert_eq!(GeneratorConfig::default().with_word_width(33).validate(), Err(ConfigError::WordWidth(33)));
        assert_eq!(GeneratorConfig::default().with_word_width(32).validate(), Ok(()));
    }

    #[test]
    fn test_identifier_digits_must_cover_width() {
        let config = GeneratorConfig::default().with_word_width(16).with_id_hex_digits(3);
        assert_eq!(config.validate(), Err(ConfigError::IdentifierDigits { digits: 3, width: 16 }));
        assert_eq!(config.with_id_hex_digits(4).validate(), Ok(()));
    }

    #[test]
    fn test_with_table() {
        let table = Table {
            name: "avr8".into(),
            word_width: Some(12),
            scope: Some("Avr8Architecture".into()),
            instructions: vec![],
        };
        let config = GeneratorConfig::default().with_table(&table);
        assert_eq!(config.word_width, 12);
        assert_eq!(config.scope.as_deref(), Some("Avr8Architecture"));

        let bare = Table { word_width: None, scope: None, ..table };
        assert_eq!(GeneratorConfig::default().with_table(&bare), GeneratorConfig::default());
    }

    #[test]
    fn test_opcode_type() {
        assert_eq!(GeneratorConfig::default().with_word_width(8).opcode_type(), "u8");
        assert_eq!(GeneratorConfig::default().with_word_width(12).opcode_type(), "u16");
        assert_eq!(GeneratorConfig::default().with_word_width(32).opcode_type(), "u32");
    }
}
