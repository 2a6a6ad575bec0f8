//! Parsers for RAxML-NG log files

use crate::types::{AlignmentSummary, RfDistResult};
use lazy_static::lazy_static;
use pythia_core::{PythiaError, PythiaResult};
use regex::Regex;

const UNIQUE_TOPOLOGIES: &str = "Number of unique topologies in this tree set:";
const RELATIVE_RF: &str = "Average relative RF distance in this tree set:";
const ABSOLUTE_RF: &str = "Average absolute RF distance in this tree set:";

lazy_static! {
    static ref SITES_PATTERNS: Regex =
        Regex::new(r"^Alignment sites / patterns:\s*(\d+)\s*/\s*(\d+)")
            .expect("sites/patterns regex is valid");
    static ref GAPS: Regex =
        Regex::new(r"^Gaps:\s*([0-9.eE+-]+)\s*%").expect("gaps regex is valid");
    static ref INVARIANT: Regex = Regex::new(r"^Invariant sites:\s*([0-9.eE+-]+)\s*%")
        .expect("invariant sites regex is valid");
}

/// Value following `label` on the first line that contains it: the last
/// whitespace separated token of that line
fn value_after<'a>(log: &'a str, label: &str) -> Option<&'a str> {
    log.lines()
        .map(str::trim)
        .find(|line| line.contains(label))
        .and_then(|line| line.split_whitespace().last())
}

fn parse_value<T: std::str::FromStr>(log: &str, label: &str) -> PythiaResult<T> {
    let raw = value_after(log, label)
        .ok_or_else(|| PythiaError::Parse(format!("RAxML-NG log is missing '{}'", label)))?;
    raw.parse::<T>().map_err(|_| {
        PythiaError::Parse(format!("Invalid value '{}' for '{}' in RAxML-NG log", raw, label))
    })
}

/// Parse the log of an `--rfdist` run
pub fn parse_rfdist_log(log: &str) -> PythiaResult<RfDistResult> {
    let num_topologies = parse_value::<usize>(log, UNIQUE_TOPOLOGIES)?;
    let rel_rfdist = parse_value::<f64>(log, RELATIVE_RF)?;
    let abs_rfdist = match value_after(log, ABSOLUTE_RF) {
        Some(_) => Some(parse_value::<f64>(log, ABSOLUTE_RF)?),
        None => None,
    };

    Ok(RfDistResult {
        num_topologies,
        rel_rfdist,
        abs_rfdist,
    })
}

fn capture_percentage(line: &str, regex: &Regex) -> Option<PythiaResult<f64>> {
    let caps = regex.captures(line)?;
    Some(
        caps[1]
            .parse::<f64>()
            .map(|pct| pct / 100.0)
            .map_err(|_| PythiaError::Parse(format!("Invalid percentage in line '{}'", line))),
    )
}

/// Parse the log of a `--parse` run
pub fn parse_alignment_log(log: &str) -> PythiaResult<AlignmentSummary> {
    let mut sites_patterns = None;
    let mut gaps = None;
    let mut invariant = None;

    for line in log.lines().map(str::trim) {
        if let Some(caps) = SITES_PATTERNS.captures(line) {
            let sites = caps[1].parse::<usize>();
            let patterns = caps[2].parse::<usize>();
            if let (Ok(sites), Ok(patterns)) = (sites, patterns) {
                sites_patterns = Some((sites, patterns));
            }
        } else if let Some(value) = capture_percentage(line, &GAPS) {
            gaps = Some(value?);
        } else if let Some(value) = capture_percentage(line, &INVARIANT) {
            invariant = Some(value?);
        }
    }

    match (sites_patterns, gaps, invariant) {
        (Some((n_sites, n_patterns)), Some(proportion_gaps), Some(proportion_invariant)) => {
            Ok(AlignmentSummary {
                n_sites,
                n_patterns,
                proportion_gaps,
                proportion_invariant,
            })
        }
        _ => Err(PythiaError::Parse(
            "RAxML-NG log is missing the alignment patterns, gaps or invariant sites".to_string(),
        )),
    }
}
