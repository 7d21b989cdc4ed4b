use crate::ir;

use std::path::{Path, PathBuf};
use quick_xml::reader::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/*
 * Table layout:
 *
 * <architecture name="avr8" word-width="16" scope="Avr8Architecture">
 *   <instruction format="ADD Rd,Rr">
 *     <encoding><box>000011</box><box name="r">r</box>...</encoding>
 *   </instruction>
 * </architecture>
 *
 * Boxes nest freely. Inside them '0' and '1' are fixed bits, whitespace is
 * layout, anything else is an operand bit.
 */

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Attribute(#[from] AttrError),
    #[error("<{element}> is missing the \"{attribute}\" attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("invalid value \"{value}\" for {attribute}")]
    InvalidValue {
        attribute: &'static str,
        value: Box<str>,
    },
    #[error("unexpected <{found}> inside <{parent}>")]
    UnexpectedElement {
        parent: &'static str,
        found: Box<str>,
    },
    #[error("instruction \"{0}\" has no <encoding>")]
    MissingEncoding(Box<str>),
    #[error("document has no <architecture> element")]
    MissingArchitecture,
    #[error("document ended inside <{0}>")]
    UnexpectedEof(&'static str),
}

/// Instruction table as loaded, before any analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: Box<str>,
    pub word_width: Option<usize>,
    pub scope: Option<Box<str>>,
    pub instructions: Vec<ir::InstructionDefinition>,
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<Box<str>>, ParseError> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == key {
            return Ok(Some(Box::from(String::from_utf8_lossy(a.value.as_ref()))));
        }
    }

    Ok(None)
}

fn required(e: &BytesStart, element: &'static str, attribute_name: &'static str) -> Result<Box<str>, ParseError> {
    attribute(e, attribute_name.as_bytes())?.ok_or(ParseError::MissingAttribute {
        element,
        attribute: attribute_name,
    })
}

fn element_name(e: &BytesStart) -> Box<str> {
    Box::from(String::from_utf8_lossy(e.name().as_ref()))
}

fn parse_group(reader: &mut Reader<&[u8]>, parent: &'static str) -> Result<ir::RawEncoding, ParseError> {
    let mut items = vec![];
    let mut buf = Vec::with_capacity(64);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Text(ref text) => {
                let symbols = String::from_utf8_lossy(text);
                items.extend(
                    symbols
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .map(ir::RawEncoding::Symbol)
                );
            }
            Event::Start(ref e) => {
                if e.name().as_ref() != b"box" {
                    return Err(ParseError::UnexpectedElement { parent, found: element_name(e) });
                }
                items.push(parse_group(reader, "box")?);
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() != b"box" {
                    return Err(ParseError::UnexpectedElement { parent, found: element_name(e) });
                }
                items.push(ir::RawEncoding::group(Vec::new()));
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof(parent)),
            _ => {}
        }
    }

    Ok(ir::RawEncoding::group(items))
}

fn parse_instruction(reader: &mut Reader<&[u8]>, format: Box<str>) -> Result<ir::InstructionDefinition, ParseError> {
    let mut buf = Vec::new();
    let mut encoding = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"encoding" && encoding.is_none() => {
                encoding = Some(parse_group(reader, "encoding")?);
            }
            Event::Empty(ref e) if e.name().as_ref() == b"encoding" && encoding.is_none() => {
                encoding = Some(ir::RawEncoding::group(Vec::new()));
            }
            Event::Start(ref e) | Event::Empty(ref e) => {
                return Err(ParseError::UnexpectedElement { parent: "instruction", found: element_name(e) });
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("instruction")),
            _ => {}
        }
    }

    match encoding {
        Some(encoding) => Ok(ir::InstructionDefinition { format, encoding }),
        None => Err(ParseError::MissingEncoding(format)),
    }
}

fn parse_header(e: &BytesStart) -> Result<Table, ParseError> {
    let name = required(e, "architecture", "name")?;

    let word_width = match attribute(e, b"word-width")? {
        Some(value) => Some(value.trim().parse::<usize>().map_err(|_| ParseError::InvalidValue {
            attribute: "word-width",
            value,
        })?),
        None => None,
    };

    Ok(Table {
        name,
        word_width,
        scope: attribute(e, b"scope")?,
        instructions: Vec::new(),
    })
}

fn parse_architecture(reader: &mut Reader<&[u8]>, mut table: Table) -> Result<Table, ParseError> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"instruction" => {
                let format = required(e, "instruction", "format")?;
                table.instructions.push(parse_instruction(reader, format)?);
            }
            Event::Empty(ref e) if e.name().as_ref() == b"instruction" => {
                let format = required(e, "instruction", "format")?;
                return Err(ParseError::MissingEncoding(format));
            }
            Event::Start(ref e) | Event::Empty(ref e) => {
                return Err(ParseError::UnexpectedElement { parent: "architecture", found: element_name(e) });
            }
            Event::End(_) => break,
            Event::Eof => return Err(ParseError::UnexpectedEof("architecture")),
            _ => {}
        }
    }

    Ok(table)
}

pub fn parse_str(source: &str) -> Result<Table, ParseError> {
    let mut reader = Reader::from_str(source);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"architecture" => {
                let table = parse_header(e)?;
                return parse_architecture(&mut reader, table);
            }
            Event::Empty(ref e) if e.name().as_ref() == b"architecture" => {
                return parse_header(e);
            }
            Event::Start(ref e) | Event::Empty(ref e) => {
                return Err(ParseError::UnexpectedElement { parent: "document", found: element_name(e) });
            }
            Event::Eof => return Err(ParseError::MissingArchitecture),
            _ => {}
        }
    }
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Table, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_str(&source)
}
