use super::{extend_without_whitespace, RawAlignment};
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::space0,
    sequence::preceded,
    IResult,
};
use pythia_core::{PythiaError, PythiaResult};
use std::io::Write;

/// Parse a FASTA header line, returning the taxon name (first token)
fn parse_header(input: &str) -> IResult<&str, &str> {
    preceded(
        tag(">"),
        preceded(space0, take_till(|c: char| c.is_whitespace())),
    )(input)
}

/// Decode FASTA text into taxa and rows.
///
/// Sequence lines may wrap; whitespace inside them is dropped. Content in
/// front of the first header is rejected.
pub fn parse_fasta_str(text: &str) -> PythiaResult<RawAlignment> {
    let mut alignment = RawAlignment::default();
    let mut current: Option<(String, Vec<u8>)> = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_start();
        if line.starts_with('>') {
            let (_, name) = parse_header(line).map_err(|e| {
                PythiaError::Alignment(format!(
                    "Failed to parse FASTA header on line {}: {:?}",
                    line_no + 1,
                    e
                ))
            })?;
            if name.is_empty() {
                return Err(PythiaError::Alignment(format!(
                    "Empty taxon name on line {}",
                    line_no + 1
                )));
            }
            if let Some((taxon, row)) = current.take() {
                alignment.push(taxon, row);
            }
            current = Some((name.to_string(), Vec::new()));
            continue;
        }

        match current.as_mut() {
            Some((_, row)) => extend_without_whitespace(row, line),
            None if line.trim().is_empty() => {}
            None => {
                return Err(PythiaError::Alignment(format!(
                    "Sequence data before the first FASTA header on line {}",
                    line_no + 1
                )))
            }
        }
    }

    if let Some((taxon, row)) = current {
        alignment.push(taxon, row);
    }

    Ok(alignment)
}

/// Write taxa and rows as FASTA, one unwrapped line per sequence
pub fn write_fasta<W: Write, S: AsRef<str>, R: AsRef<[u8]>>(
    writer: &mut W,
    taxa: &[S],
    rows: &[R],
) -> PythiaResult<()> {
    for (taxon, row) in taxa.iter().zip(rows) {
        writeln!(writer, ">{}", taxon.as_ref())?;
        writer.write_all(row.as_ref())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
