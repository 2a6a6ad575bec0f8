//! Relaxed PHYLIP codec
//!
//! The header holds the number of taxa and sites. Names are separated from
//! sequence data by whitespace and may be of any length. Both the interleaved
//! and the sequential layout are accepted; the sequential reading is tried
//! first and the interleaved one is used when the rows it yields do not match
//! the header.

use super::{extend_without_whitespace, RawAlignment};
use nom::{
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    sequence::{delimited, separated_pair},
    IResult,
};
use pythia_core::{PythiaError, PythiaResult};
use std::io::Write;

fn count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn header(input: &str) -> IResult<&str, (usize, usize)> {
    all_consuming(delimited(
        space0,
        separated_pair(count, space1, count),
        space0,
    ))(input)
}

/// Parse a PHYLIP header line: exactly two whitespace separated integers
pub fn parse_phylip_header(line: &str) -> Option<(usize, usize)> {
    header(line).ok().map(|(_, dims)| dims)
}

fn split_named_line(line: &str) -> Result<(&str, &str), String> {
    line.split_once(char::is_whitespace)
        .ok_or_else(|| format!("line '{}' has no sequence data after the taxon name", line))
}

fn check_dimensions(
    alignment: &RawAlignment,
    n_taxa: usize,
    n_sites: usize,
) -> Result<(), String> {
    if alignment.len() != n_taxa {
        return Err(format!(
            "found {} taxa, header declares {}",
            alignment.len(),
            n_taxa
        ));
    }
    if let Some((taxon, row)) = alignment
        .taxa
        .iter()
        .zip(&alignment.rows)
        .find(|(_, row)| row.len() != n_sites)
    {
        return Err(format!(
            "taxon {} has {} sites, header declares {}",
            taxon,
            row.len(),
            n_sites
        ));
    }
    Ok(())
}

/// First block carries the names, following blocks are appended round-robin
fn decode_interleaved(
    body: &[&str],
    n_taxa: usize,
    n_sites: usize,
) -> Result<RawAlignment, String> {
    if body.len() < n_taxa {
        return Err(format!(
            "expected at least {} lines, found {}",
            n_taxa,
            body.len()
        ));
    }

    let mut alignment = RawAlignment::default();
    for line in &body[..n_taxa] {
        let (name, data) = split_named_line(line)?;
        let mut row = Vec::with_capacity(n_sites);
        extend_without_whitespace(&mut row, data);
        alignment.push(name.to_string(), row);
    }
    for (i, line) in body[n_taxa..].iter().enumerate() {
        extend_without_whitespace(&mut alignment.rows[i % n_taxa], line);
    }

    check_dimensions(&alignment, n_taxa, n_sites)?;
    Ok(alignment)
}

/// Every taxon starts on a named line; unnamed lines continue it until the
/// declared number of sites is reached
fn decode_sequential(
    body: &[&str],
    n_taxa: usize,
    n_sites: usize,
) -> Result<RawAlignment, String> {
    let mut alignment = RawAlignment::default();

    for line in body {
        let starts_taxon = alignment
            .rows
            .last()
            .map_or(true, |row| row.len() >= n_sites);

        if starts_taxon {
            if alignment.len() == n_taxa {
                return Err(format!("unexpected line '{}' after the last taxon", line));
            }
            let (name, data) = split_named_line(line)?;
            let mut row = Vec::with_capacity(n_sites);
            extend_without_whitespace(&mut row, data);
            alignment.push(name.to_string(), row);
        } else if let Some(row) = alignment.rows.last_mut() {
            extend_without_whitespace(row, line);
        }
    }

    check_dimensions(&alignment, n_taxa, n_sites)?;
    Ok(alignment)
}

/// Decode relaxed PHYLIP text into taxa and rows
pub fn parse_phylip_str(text: &str) -> PythiaResult<RawAlignment> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let first = lines
        .next()
        .ok_or_else(|| PythiaError::Alignment("PHYLIP file is empty".to_string()))?;
    let (n_taxa, n_sites) = parse_phylip_header(first).ok_or_else(|| {
        PythiaError::Alignment(format!("Invalid PHYLIP header '{}'", first))
    })?;
    if n_taxa == 0 || n_sites == 0 {
        return Err(PythiaError::Alignment(format!(
            "PHYLIP header '{}' declares an empty alignment",
            first
        )));
    }
    let body: Vec<&str> = lines.collect();

    let sequential = match decode_sequential(&body, n_taxa, n_sites) {
        Ok(alignment) => return Ok(alignment),
        Err(reason) => reason,
    };
    let interleaved = match decode_interleaved(&body, n_taxa, n_sites) {
        Ok(alignment) => return Ok(alignment),
        Err(reason) => reason,
    };

    Err(PythiaError::Alignment(format!(
        "PHYLIP body does not match header {} {} (interleaved: {}; sequential: {})",
        n_taxa, n_sites, interleaved, sequential
    )))
}

/// Write taxa and rows as sequential relaxed PHYLIP
pub fn write_phylip<W: Write, S: AsRef<str>, R: AsRef<[u8]>>(
    writer: &mut W,
    taxa: &[S],
    rows: &[R],
) -> PythiaResult<()> {
    let n_sites = rows.first().map_or(0, |row| row.as_ref().len());
    writeln!(writer, "{} {}", taxa.len(), n_sites)?;
    for (taxon, row) in taxa.iter().zip(rows) {
        write!(writer, "{} ", taxon.as_ref())?;
        writer.write_all(row.as_ref())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header() {
        assert_eq!(parse_phylip_header("4 10"), Some((4, 10)));
        assert_eq!(parse_phylip_header("  68\t766  "), Some((68, 766)));
        assert_eq!(parse_phylip_header("4"), None);
        assert_eq!(parse_phylip_header("4 10 2"), None);
        assert_eq!(parse_phylip_header("4 x"), None);
        assert_eq!(parse_phylip_header(">T1"), None);
    }

    #[test]
    fn test_sequential_single_line() {
        let text = "3 6\nalpha ACGTAC\nbeta  ACG TAA\ngamma ACGTTT\n";
        let alignment = parse_phylip_str(text).unwrap();

        assert_eq!(alignment.taxa, vec!["alpha", "beta", "gamma"]);
        assert_eq!(alignment.rows[1], b"ACGTAA".to_vec());
    }

    #[test]
    fn test_interleaved() {
        let text = "2 8\nT1 ACGT\nT2 TTGG\n\nACGT\nCCAA\n";
        let alignment = parse_phylip_str(text).unwrap();

        assert_eq!(alignment.rows[0], b"ACGTACGT".to_vec());
        assert_eq!(alignment.rows[1], b"TTGGCCAA".to_vec());
    }

    #[test]
    fn test_sequential_wrapped() {
        let text = "2 8\nT1 ACGT\nACGT\nT2 TTGG\nCCAA\n";
        let alignment = parse_phylip_str(text).unwrap();

        assert_eq!(alignment.taxa, vec!["T1", "T2"]);
        assert_eq!(alignment.rows[0], b"ACGTACGT".to_vec());
        assert_eq!(alignment.rows[1], b"TTGGCCAA".to_vec());
    }

    #[test]
    fn test_sequential_continuation_with_inner_space() {
        // "G T" also reads as a named line in the interleaved layout
        let text = "2 4\nA AC\nG T\nB T\nTGG\n";
        let alignment = parse_phylip_str(text).unwrap();

        assert_eq!(alignment.taxa, vec!["A", "B"]);
        assert_eq!(alignment.rows[0], b"ACGT".to_vec());
        assert_eq!(alignment.rows[1], b"TTGG".to_vec());
    }

    #[test]
    fn test_header_mismatch() {
        let err = parse_phylip_str("3 4\nA ACGT\nB ACGT\n").unwrap_err();
        assert!(matches!(err, PythiaError::Alignment(_)));

        let err = parse_phylip_str("2 4\nA ACGT\nB ACG\n").unwrap_err();
        assert!(err.to_string().contains("taxon B has 3 sites"));
    }

    #[test]
    fn test_write_phylip() {
        let mut out = Vec::new();
        write_phylip(&mut out, &["A", "B"], &[b"AC-T", b"ACGT"]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2 4\nA AC-T\nB ACGT\n");
    }
}
