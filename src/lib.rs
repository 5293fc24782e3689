// src/lib.rs
pub mod config;
pub mod error;
pub mod fasta;
pub mod summarize;
pub mod taxonomy;
pub mod types;

use std::fmt::Write as FmtWrite;

use crate::config::SummaryConfig;
use crate::error::SummaryResult;
use crate::fasta::{apply_size_cutoff, read_sequence_lengths};
use crate::summarize::summarize_taxa;
use crate::taxonomy::read_taxon_assignments;
use crate::types::{GenomeSizes, SummaryReportRow, TaxaSlice, TaxonAbundance};

/// Column header of the abundance report. Kept exactly as downstream
/// parsers expect it, including the joined "Filtered Genome SizeTaxon".
pub const REPORT_HEADER: &str =
    "File\tTaxaSlice\tTotal Genome Size\tFiltered Genome SizeTaxon\tPercentAbundance";

/// Outcome of one summary run. Text is generated on demand from the rows.
#[derive(Debug)]
pub struct SummaryResults {
    /// One row per distinct (truncated) lineage, largest first.
    pub rows: Vec<SummaryReportRow>,
    pub abundance: TaxonAbundance,
    pub genome_sizes: GenomeSizes,
    pub taxa_slice: TaxaSlice,
    /// Bases that were attributed to some lineage.
    pub assigned_bases: u64,
    /// Taxonomy entries without a contig passing the cutoff.
    pub unmatched_assignments: usize,
}

impl SummaryResults {
    /// Generate the tab separated report (header included) on demand
    pub fn get_summary_report(&self) -> String {
        let mut output = String::new();
        output.push_str(REPORT_HEADER);
        output.push('\n');

        for row in &self.rows {
            writeln!(
                output,
                "{}\t{}\t{}\t{}\t{}\t{}",
                row.file,
                row.slice,
                row.total_genome_length,
                row.filtered_genome_length,
                row.taxon,
                format_percentage(row.pct)
            )
            .unwrap();
        }
        output
    }
}

/// Shortest round-trip form of `pct`, always with a decimal point or an
/// exponent, with exponents written sign-and-two-digits (`1e-05`).
pub fn format_percentage(pct: f64) -> String {
    let repr = format!("{:?}", pct);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Runs the whole pipeline for one assembly:
///  1) read contig lengths from the FASTA
///  2) apply the size cutoff
///  3) read the contig -> lineage assignments
///  4) aggregate bases per lineage and normalise to percentages
pub fn summarize_assembly(config: &SummaryConfig) -> SummaryResult<SummaryResults> {
    let lengths = read_sequence_lengths(&config.fasta_file)?;
    let (filtered, genome_sizes) = apply_size_cutoff(lengths, config.size_cutoff);

    let assignments = read_taxon_assignments(&config.kraken_file)?;
    let (totals, abundance) = summarize_taxa(&assignments, &filtered, config.taxa_slice)?;

    let file = config.fasta_basename();
    let mut rows: Vec<SummaryReportRow> = totals
        .bases
        .iter()
        .map(|(taxon, &bases)| SummaryReportRow {
            file: file.clone(),
            slice: config.taxa_slice,
            total_genome_length: genome_sizes.total_genome_length,
            filtered_genome_length: genome_sizes.filtered_genome_length,
            taxon: taxon.clone(),
            pct: abundance[taxon],
            bases,
        })
        .collect();
    rows.sort_by(|a, b| b.bases.cmp(&a.bases).then_with(|| a.taxon.cmp(&b.taxon)));

    Ok(SummaryResults {
        rows,
        abundance,
        genome_sizes,
        taxa_slice: config.taxa_slice,
        assigned_bases: totals.total_bases,
        unmatched_assignments: totals.unmatched_assignments,
    })
}
