//! File format and data type detection

use crate::alphabet::Alphabet;
use crate::formats::parse_phylip_header;
use pythia_core::{DataType, FileFormat, PythiaError, PythiaResult};
use std::collections::BTreeSet;
use std::path::Path;

/// Detect the file format from the first non-empty line of `text`
pub fn detect_format(text: &str) -> PythiaResult<FileFormat> {
    let first = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| PythiaError::Format("the MSA file is empty".to_string()))?;

    if first.starts_with('>') {
        Ok(FileFormat::Fasta)
    } else if parse_phylip_header(first).is_some() {
        Ok(FileFormat::Phylip)
    } else {
        Err(PythiaError::Format(format!(
            "could not detect the file type from the first line '{}'",
            first
        )))
    }
}

/// Detect the file format of an alignment file
pub fn detect_file_format<P: AsRef<Path>>(path: P) -> PythiaResult<FileFormat> {
    let text = std::fs::read_to_string(path.as_ref())?;
    detect_format(&text)
}

fn collect_offending(chars: &BTreeSet<u8>, alphabet: &Alphabet) -> Vec<char> {
    chars
        .iter()
        .filter(|&&c| !alphabet.is_permissible(c))
        .map(|&c| char::from(c))
        .collect()
}

/// Guess the data type of uppercase sequence rows.
///
/// Any digit makes the data morphological. Otherwise DNA is tried before
/// protein, so an alignment using only `A`, `C`, `G`, `T` and ambiguity codes
/// shared by both alphabets is classified as DNA.
pub fn guess_data_type<R: AsRef<[u8]>>(rows: &[R]) -> PythiaResult<DataType> {
    let chars: BTreeSet<u8> = rows
        .iter()
        .flat_map(|row| row.as_ref().iter().copied())
        .collect();

    if chars.iter().any(u8::is_ascii_digit) {
        return Ok(DataType::Morph);
    }

    let dna = Alphabet::for_data_type(DataType::Dna);
    if chars.iter().all(|&c| dna.is_permissible(c)) {
        return Ok(DataType::Dna);
    }

    let aa = Alphabet::for_data_type(DataType::Aa);
    if chars.iter().all(|&c| aa.is_permissible(c)) {
        return Ok(DataType::Aa);
    }

    let not_dna = collect_offending(&chars, dna);
    let not_aa = collect_offending(&chars, aa);
    let details = format!(
        "Characters {:?} are not valid DNA characters and characters {:?} are not valid protein characters",
        not_dna, not_aa
    );
    Err(PythiaError::DataType {
        offending: not_aa,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_fasta() {
        assert_eq!(detect_format(">T1\nACGT\n").unwrap(), FileFormat::Fasta);
        assert_eq!(detect_format("\n\n  >T1\nACGT\n").unwrap(), FileFormat::Fasta);
    }

    #[test]
    fn test_detect_phylip() {
        assert_eq!(detect_format("4 10\nA ACGT\n").unwrap(), FileFormat::Phylip);
        assert_eq!(detect_format(" 68   766 \n").unwrap(), FileFormat::Phylip);
    }

    #[test]
    fn test_detect_rejects_other_content() {
        let err = detect_format("#NEXUS\nbegin data;\n").unwrap_err();
        match err {
            PythiaError::Format(msg) => assert!(msg.contains("#NEXUS")),
            other => panic!("Expected Format error, got {:?}", other),
        }

        assert!(matches!(detect_format("4 10 12\n"), Err(PythiaError::Format(_))));
        assert!(matches!(detect_format("  \n"), Err(PythiaError::Format(_))));
    }

    #[test]
    fn test_detect_file_format() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "2 4\nA ACGT\nB ACGA\n").unwrap();
        assert_eq!(detect_file_format(file.path()).unwrap(), FileFormat::Phylip);
    }

    #[test]
    fn test_guess_dna() {
        let rows = [b"ACGTN-?".to_vec(), b"RYKMU.*".to_vec()];
        assert_eq!(guess_data_type(&rows).unwrap(), DataType::Dna);
    }

    #[test]
    fn test_guess_prefers_dna() {
        // every character is valid in both alphabets
        let rows = [b"ACGTACGT".to_vec()];
        assert_eq!(guess_data_type(&rows).unwrap(), DataType::Dna);
    }

    #[test]
    fn test_guess_aa() {
        let rows = [b"MKLVEQ-".to_vec(), b"MKIVEZB".to_vec()];
        assert_eq!(guess_data_type(&rows).unwrap(), DataType::Aa);
    }

    #[test]
    fn test_guess_morph() {
        let rows = [b"0101?".to_vec(), b"1120-".to_vec()];
        assert_eq!(guess_data_type(&rows).unwrap(), DataType::Morph);
    }

    #[test]
    fn test_guess_unsupported() {
        let rows = [b"ACGT".to_vec(), b"MKJU".to_vec()];
        match guess_data_type(&rows).unwrap_err() {
            PythiaError::DataType { offending, details } => {
                assert_eq!(offending, vec!['J', 'U']);
                assert!(details.contains("'J'"));
            }
            other => panic!("Expected DataType error, got {:?}", other),
        }
    }
}
