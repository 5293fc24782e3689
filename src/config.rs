// src/config.rs

use std::path::PathBuf;

use crate::error::{SummaryError, SummaryResult};
use crate::types::TaxaSlice;

pub const DEFAULT_SIZE_CUTOFF: i64 = 1000;
/// Sentinel for "use the full lineage".
pub const DEFAULT_TAX_DIVISION: i64 = -1;

/// Settings for one summary run. Built once, then only borrowed.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub kraken_file: PathBuf,
    pub fasta_file: PathBuf,
    /// Minimum contig length (inclusive) to be aggregated.
    pub size_cutoff: u64,
    pub taxa_slice: TaxaSlice,
}

impl SummaryConfig {
    /// Validates `tax_division`: -1 means the full lineage, `n >= 0` keeps
    /// the first `n` ranks, anything below -1 is rejected. A negative
    /// `size_cutoff` keeps every contig.
    pub fn new(
        kraken_file: impl Into<PathBuf>,
        fasta_file: impl Into<PathBuf>,
        size_cutoff: i64,
        tax_division: i64,
    ) -> SummaryResult<Self> {
        Ok(Self {
            kraken_file: kraken_file.into(),
            fasta_file: fasta_file.into(),
            size_cutoff: size_cutoff_from_raw(size_cutoff),
            taxa_slice: taxa_slice_from_division(tax_division)?,
        })
    }

    /// File name of the FASTA, as printed in the `File` column.
    pub fn fasta_basename(&self) -> String {
        self.fasta_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.fasta_file.to_string_lossy().into_owned())
    }
}

pub fn size_cutoff_from_raw(size_cutoff: i64) -> u64 {
    u64::try_from(size_cutoff).unwrap_or(0)
}

pub fn taxa_slice_from_division(tax_division: i64) -> SummaryResult<TaxaSlice> {
    match tax_division {
        -1 => Ok(TaxaSlice::Full),
        n if n >= 0 => usize::try_from(n)
            .map(TaxaSlice::Prefix)
            .map_err(|_| SummaryError::Configuration(format!("tax_division {} is too large", n))),
        n => Err(SummaryError::Configuration(format!(
            "tax_division must be -1 (full lineage) or a non-negative rank count, got {}",
            n
        ))),
    }
}
