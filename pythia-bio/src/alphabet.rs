//! Character classification tables for DNA, protein and morphological data
//!
//! Each [`DataType`] maps to one static [`Alphabet`] describing which
//! characters are permitted, which count as gaps, how raw characters are
//! normalised, and which ambiguity codes may stand in for a concrete state.

use lazy_static::lazy_static;
use pythia_core::DataType;

/// Canonical gap code every gap character is normalised to
pub const GAP: u8 = b'-';

/// Characters treated as gaps for every data type
pub const GAP_CHARS: &[u8] = b"-?.X*";

/// Concrete nucleotides (`U` is normalised to `T`)
pub const NUCLEOTIDES: &[u8] = b"ACGTU";

/// DNA ambiguity codes and the bases each may represent
pub const DNA_AMBIGUITY: &[(u8, &[u8])] = &[
    (b'R', b"AG"),
    (b'Y', b"CT"),
    (b'S', b"CG"),
    (b'W', b"AT"),
    (b'K', b"GT"),
    (b'M', b"AC"),
    (b'B', b"CGT"),
    (b'D', b"AGT"),
    (b'H', b"ACT"),
    (b'V', b"ACG"),
];

/// The 20 standard amino acids
pub const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Amino-acid ambiguity codes
pub const AA_AMBIGUITY: &[(u8, &[u8])] = &[(b'B', b"DN"), (b'Z', b"EQ")];

/// Numeric states of morphological characters
pub const MORPH_STATES: &[u8] = b"0123456789";

const DNA_GAP_CHARS: &[u8] = b"-?.X*N";

/// Behaviour table for one data type
#[derive(Debug)]
pub struct Alphabet {
    data_type: DataType,
    states: &'static [u8],
    ambiguity: &'static [(u8, &'static [u8])],
    gaps: &'static [u8],
    permissible: [bool; 256],
}

impl Alphabet {
    fn build(
        data_type: DataType,
        states: &'static [u8],
        ambiguity: &'static [(u8, &'static [u8])],
        gaps: &'static [u8],
    ) -> Self {
        let mut permissible = [false; 256];
        for &c in states.iter().chain(gaps) {
            permissible[c as usize] = true;
        }
        for &(code, _) in ambiguity {
            permissible[code as usize] = true;
        }

        Self {
            data_type,
            states,
            ambiguity,
            gaps,
            permissible,
        }
    }

    /// The alphabet of the given data type
    pub fn for_data_type(data_type: DataType) -> &'static Alphabet {
        match data_type {
            DataType::Dna => &*DNA,
            DataType::Aa => &*AA,
            DataType::Morph => &*MORPH,
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Concrete states of this alphabet
    pub fn states(&self) -> &'static [u8] {
        self.states
    }

    pub fn is_gap(&self, c: u8) -> bool {
        self.gaps.contains(&c)
    }

    /// Whether `c` may occur in an alignment of this data type
    pub fn is_permissible(&self, c: u8) -> bool {
        self.permissible[c as usize]
    }

    /// Map a raw (uppercase) character to its normalised code
    pub fn normalize(&self, c: u8) -> u8 {
        if self.is_gap(c) {
            return GAP;
        }
        match (self.data_type, c) {
            (DataType::Dna, b'U') => b'T',
            _ => c,
        }
    }

    /// Whether the normalised code `c` may represent `state`
    pub fn resolves_to(&self, c: u8, state: u8) -> bool {
        c == state
            || c == GAP
            || self
                .ambiguity
                .iter()
                .any(|&(code, bases)| code == c && bases.contains(&state))
    }

    /// All codes that may represent `state`: the state itself, the gap and
    /// every ambiguity code covering it
    pub fn resolvable_set(&self, state: u8) -> Vec<u8> {
        let mut set = vec![state, GAP];
        set.extend(
            self.ambiguity
                .iter()
                .filter(|(_, bases)| bases.contains(&state))
                .map(|&(code, _)| code),
        );
        set
    }

    /// Whether a set of distinct normalised codes could all be one state
    pub fn is_invariant(&self, codes: &[u8]) -> bool {
        self.states
            .iter()
            .any(|&state| codes.iter().all(|&c| self.resolves_to(c, state)))
    }
}

lazy_static! {
    static ref DNA: Alphabet = Alphabet::build(DataType::Dna, NUCLEOTIDES, DNA_AMBIGUITY, DNA_GAP_CHARS);
    static ref AA: Alphabet = Alphabet::build(DataType::Aa, AMINO_ACIDS, AA_AMBIGUITY, GAP_CHARS);
    static ref MORPH: Alphabet = Alphabet::build(DataType::Morph, MORPH_STATES, &[], GAP_CHARS);
}
