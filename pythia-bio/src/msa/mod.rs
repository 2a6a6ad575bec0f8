//! The alignment matrix: taxa, normalised character rows and data type

mod stats;

use crate::alphabet::Alphabet;
use crate::detect::{detect_format, guess_data_type};
use crate::formats::{parse_fasta_str, parse_phylip_str, write_fasta, write_phylip, RawAlignment};
use pythia_core::{DataType, FileFormat, PythiaError, PythiaResult};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

/// Lazily computed statistics of one matrix
#[derive(Debug, Clone, Default)]
struct StatsCache {
    pattern_counts: OnceLock<HashMap<Vec<u8>, usize>>,
    n_patterns: OnceLock<usize>,
    proportion_gaps: OnceLock<f64>,
    proportion_invariant: OnceLock<f64>,
}

/// A validated multiple sequence alignment.
///
/// Rows are stored row-major in a single buffer and hold normalised codes:
/// every gap character is `-` and DNA `U` is stored as `T`. Instances are
/// never mutated; reductions build new matrices.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    name: String,
    taxa: Vec<String>,
    data: Vec<u8>,
    n_sites: usize,
    data_type: DataType,
    cache: StatsCache,
}

/// Overrides for [`parse`] and [`parse_str`]; unset fields are detected
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub format: Option<FileFormat>,
    pub data_type: Option<DataType>,
    pub name: Option<String>,
}

impl ParseOptions {
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl AlignmentMatrix {
    /// Build a matrix from taxon names and rows of normalised codes
    pub fn new(
        name: impl Into<String>,
        taxa: Vec<String>,
        rows: Vec<Vec<u8>>,
        data_type: DataType,
    ) -> PythiaResult<Self> {
        let name = name.into();

        if taxa.len() != rows.len() {
            return Err(PythiaError::Alignment(format!(
                "{}: {} taxon names but {} sequences",
                name,
                taxa.len(),
                rows.len()
            )));
        }
        if taxa.is_empty() {
            return Err(PythiaError::Alignment(format!("{}: alignment has no taxa", name)));
        }

        let n_sites = rows[0].len();
        if n_sites == 0 {
            return Err(PythiaError::Alignment(format!("{}: alignment has no sites", name)));
        }
        if let Some((taxon, row)) = taxa.iter().zip(&rows).find(|(_, r)| r.len() != n_sites) {
            return Err(PythiaError::Alignment(format!(
                "{}: sequences differ in length ({} has {} sites, {} has {})",
                name,
                taxa[0],
                n_sites,
                taxon,
                row.len()
            )));
        }

        let data = rows.concat();
        Ok(Self {
            name,
            taxa,
            data,
            n_sites,
            data_type,
            cache: StatsCache::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn alphabet(&self) -> &'static Alphabet {
        Alphabet::for_data_type(self.data_type)
    }

    pub fn n_taxa(&self) -> usize {
        self.taxa.len()
    }

    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    /// Row of taxon `index`
    pub fn sequence(&self, index: usize) -> &[u8] {
        let start = index * self.n_sites;
        &self.data[start..start + self.n_sites]
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.n_sites)
    }

    /// Codes of column `site`, top to bottom
    pub fn column(&self, site: usize) -> Vec<u8> {
        self.sequences().map(|row| row[site]).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.n_sites).map(move |site| self.column(site))
    }

    /// Serialise the matrix in the given format
    pub fn write_to<W: Write>(&self, writer: &mut W, format: FileFormat) -> PythiaResult<()> {
        let rows: Vec<&[u8]> = self.sequences().collect();
        match format {
            FileFormat::Fasta => write_fasta(writer, self.taxa.as_slice(), rows.as_slice()),
            FileFormat::Phylip => write_phylip(writer, self.taxa.as_slice(), rows.as_slice()),
        }
    }

    /// Write the matrix to `path`
    pub fn write<P: AsRef<Path>>(&self, path: P, format: FileFormat) -> PythiaResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_text(&self, format: FileFormat) -> PythiaResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, format)?;
        String::from_utf8(buffer)
            .map_err(|e| PythiaError::Serialization(format!("alignment is not UTF-8: {}", e)))
    }
}

impl PartialEq for AlignmentMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.data_type == other.data_type
            && self.n_sites == other.n_sites
            && self.taxa == other.taxa
            && self.data == other.data
    }
}

impl fmt::Display for AlignmentMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} taxa x {} sites, {})",
            self.name,
            self.n_taxa(),
            self.n_sites,
            self.data_type
        )
    }
}

fn decode(text: &str, format: FileFormat) -> PythiaResult<RawAlignment> {
    match format {
        FileFormat::Fasta => parse_fasta_str(text),
        FileFormat::Phylip => parse_phylip_str(text),
    }
}

/// Parse alignment text held in memory
pub fn parse_str(text: &str, options: &ParseOptions) -> PythiaResult<AlignmentMatrix> {
    let format = match options.format {
        Some(format) => format,
        None => detect_format(text)?,
    };

    let text = text.to_ascii_uppercase();
    let raw = decode(&text, format)?;

    let data_type = match options.data_type {
        Some(data_type) => data_type,
        None => guess_data_type(raw.rows.as_slice())?,
    };

    let alphabet = Alphabet::for_data_type(data_type);
    let rows = raw
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(|c| alphabet.normalize(c)).collect())
        .collect();

    let name = options.name.clone().unwrap_or_else(|| "msa".to_string());
    let msa = AlignmentMatrix::new(name, raw.taxa, rows, data_type)?;
    tracing::debug!("Parsed {} as {}", msa, format);
    Ok(msa)
}

/// Parse an alignment file; the matrix is named after the file unless
/// `options.name` is set
pub fn parse<P: AsRef<Path>>(path: P, options: &ParseOptions) -> PythiaResult<AlignmentMatrix> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    let mut options = options.clone();
    if options.name.is_none() {
        options.name = Some(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        );
    }

    parse_str(&text, &options)
}
