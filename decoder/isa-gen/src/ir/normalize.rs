use super::{Bit, Error, InstructionDefinition, RawEncoding};

fn flatten_into(raw: &RawEncoding, out: &mut Vec<Bit>) {
    match raw {
        RawEncoding::Symbol(symbol) => out.push(Bit::from_symbol(*symbol)),
        RawEncoding::Group(items) => {
            for item in items.iter() {
                flatten_into(item, out);
            }
        }
    }
}

/// Flattened source symbols, for diagnostics.
pub fn render_symbols(raw: &RawEncoding) -> String {
    match raw {
        RawEncoding::Symbol(symbol) => symbol.to_string(),
        RawEncoding::Group(items) => items.iter().map(render_symbols).collect(),
    }
}

/// Flattens any nesting, keeping left to right (MSB first) order.
pub fn normalize(raw: &RawEncoding) -> Vec<Bit> {
    let mut bits = Vec::with_capacity(32);
    flatten_into(raw, &mut bits);
    bits
}

pub fn verify(definition: &InstructionDefinition, bits: &[Bit], expected_width: usize) -> Result<(), Error> {
    if bits.len() != expected_width {
        return Err(Error::MalformedEncoding {
            format: definition.format.clone(),
            encoding: render_symbols(&definition.encoding).into(),
            length: bits.len(),
        });
    }

    Ok(())
}

/// `normalize` followed by `verify`, the form every caller wants.
pub fn normalize_checked(definition: &InstructionDefinition, expected_width: usize) -> Result<Box<[Bit]>, Error> {
    let bits = normalize(&definition.encoding);
    verify(definition, &bits, expected_width)?;
    Ok(bits.into())
}
