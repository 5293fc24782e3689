//src/types.rs

use ahash::AHashMap;
use std::fmt;

/// Contig identifier -> sequence length.
pub type SequenceLengths = AHashMap<String, u64>;
/// Contig identifier -> raw `;`-delimited lineage.
pub type TaxonAssignment = AHashMap<String, String>;
/// (Truncated) lineage -> percentage of aggregated bases.
pub type TaxonAbundance = AHashMap<String, f64>;

/// How much of each lineage is kept when grouping contigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxaSlice {
    /// Group by the whole lineage string.
    Full,
    /// Group by the first `n` `;`-separated ranks.
    Prefix(usize),
}

impl TaxaSlice {
    /// Returns the grouping key for `lineage`.
    ///
    /// `Prefix(n)` behaves like a slice: asking for more ranks than the
    /// lineage has keeps all of them, and `Prefix(0)` yields `""`.
    pub fn truncate(&self, lineage: &str) -> String {
        match *self {
            TaxaSlice::Full => lineage.to_string(),
            TaxaSlice::Prefix(n) => lineage.split(';').take(n).collect::<Vec<_>>().join(";"),
        }
    }
}

impl fmt::Display for TaxaSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxaSlice::Full => write!(f, "Full"),
            TaxaSlice::Prefix(n) => write!(f, "0:{}", n),
        }
    }
}

/// Whole-assembly size statistics, before and after the length cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenomeSizes {
    pub total_genome_length: u64,
    pub filtered_genome_length: u64,
    pub total_contigs: usize,
    pub filtered_contigs: usize,
}

/// A structured representation of one row in the abundance report.
///  File  TaxaSlice  Total Genome Size  Filtered Genome Size  Taxon  PercentAbundance
#[derive(Debug, Clone)]
pub struct SummaryReportRow {
    pub file: String,
    pub slice: TaxaSlice,
    pub total_genome_length: u64,
    pub filtered_genome_length: u64,
    pub taxon: String,
    pub pct: f64,
    pub bases: u64, // not printed, used for ordering
}
