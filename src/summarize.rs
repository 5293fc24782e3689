// src/summarize.rs

use ahash::AHashMap;

use crate::error::{SummaryError, SummaryResult};
use crate::types::{SequenceLengths, TaxaSlice, TaxonAbundance, TaxonAssignment};

/// Bases attributed to each (truncated) lineage before normalisation.
#[derive(Debug, Clone, Default)]
pub struct TaxonTotals {
    pub bases: AHashMap<String, u64>,
    pub total_bases: u64,
    /// Taxonomy entries joined to a contig.
    pub matched_contigs: usize,
    /// Taxonomy entries whose contig is missing or below the cutoff.
    pub unmatched_assignments: usize,
    /// Contigs that were available for the join.
    pub candidate_contigs: usize,
}

impl TaxonTotals {
    /// Groups contig lengths by lineage. Only the id join filters here; the
    /// size cutoff must already have been applied to `lengths`.
    pub fn accumulate(assignments: &TaxonAssignment, lengths: &SequenceLengths, slice: TaxaSlice) -> Self {
        let mut totals = TaxonTotals {
            candidate_contigs: lengths.len(),
            ..TaxonTotals::default()
        };

        for (contig_id, lineage) in assignments {
            let Some(&length) = lengths.get(contig_id) else {
                totals.unmatched_assignments += 1;
                continue;
            };

            *totals.bases.entry(slice.truncate(lineage)).or_insert(0) += length;
            totals.total_bases += length;
            totals.matched_contigs += 1;
        }
        totals
    }

    /// Percent of `total_bases` per lineage. Fails when there is nothing to
    /// divide by.
    pub fn abundance(&self) -> SummaryResult<TaxonAbundance> {
        if self.total_bases == 0 {
            return Err(if self.matched_contigs == 0 {
                SummaryError::NoOverlap {
                    assignments: self.unmatched_assignments,
                    contigs: self.candidate_contigs,
                }
            } else {
                SummaryError::NoAssignedBases {
                    matched: self.matched_contigs,
                }
            });
        }

        let total = self.total_bases as f64;
        Ok(self
            .bases
            .iter()
            .map(|(taxon, &bases)| (taxon.clone(), 100.0 * bases as f64 / total))
            .collect())
    }
}

/// Joins contig lengths with their lineages and converts the per-lineage
/// sums into percentages of all aggregated bases.
///
/// Fails with [`SummaryError::NoOverlap`] when no id is shared and with
/// [`SummaryError::NoAssignedBases`] when the shared contigs are all empty.
pub fn summarize_taxa(
    assignments: &TaxonAssignment,
    lengths: &SequenceLengths,
    slice: TaxaSlice,
) -> SummaryResult<(TaxonTotals, TaxonAbundance)> {
    let totals = TaxonTotals::accumulate(assignments, lengths, slice);

    if totals.unmatched_assignments > 0 {
        log::info!(
            "{} of {} taxonomy entries have no contig passing the size cutoff",
            totals.unmatched_assignments,
            assignments.len()
        );
    }

    let abundance = totals.abundance()?;

    log::info!(
        "{} bases assigned to {} taxa ({})",
        totals.total_bases,
        abundance.len(),
        slice
    );
    Ok((totals, abundance))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn lengths(entries: &[(&str, u64)]) -> SequenceLengths {
        entries.iter().map(|&(id, len)| (id.to_string(), len)).collect()
    }

    fn taxa(entries: &[(&str, &str)]) -> TaxonAssignment {
        entries
            .iter()
            .map(|&(id, lineage)| (id.to_string(), lineage.to_string()))
            .collect()
    }

    fn mixed_inputs() -> (TaxonAssignment, SequenceLengths) {
        let assignments = taxa(&[
            ("c1", "Bacteria;Firmicutes;Bacilli"),
            ("c2", "Bacteria;Firmicutes;Clostridia"),
            ("c3", "Bacteria;Proteobacteria;Gammaproteobacteria"),
            ("c4", "Eukaryota;Chordata"),
            ("c5", "Bacteria;Firmicutes;Bacilli"),
            ("orphan", "Archaea"),
        ]);
        let lengths = lengths(&[("c1", 1500), ("c2", 2500), ("c3", 3000), ("c4", 1000), ("c5", 2000)]);
        (assignments, lengths)
    }

    #[test]
    fn test_full_lineage_two_buckets() {
        let assignments = taxa(&[("A", "X;Y"), ("C", "X;Z")]);
        let lens = lengths(&[("A", 1500), ("C", 1500)]);

        let (_, abundance) = summarize_taxa(&assignments, &lens, TaxaSlice::Full).unwrap();
        assert_eq!(abundance.len(), 2);
        assert!((abundance["X;Y"] - 50.0).abs() < EPS);
        assert!((abundance["X;Z"] - 50.0).abs() < EPS);
    }

    #[test]
    fn test_truncation_collapses_buckets() {
        let assignments = taxa(&[("A", "X;Y"), ("C", "X;Z")]);
        let lens = lengths(&[("A", 1500), ("C", 1500)]);

        let (totals, abundance) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(1)).unwrap();
        assert_eq!(abundance.len(), 1);
        assert_eq!(abundance["X"], 100.0);
        assert_eq!(totals.bases["X"], 3000);
    }

    #[test]
    fn test_zero_depth_single_empty_bucket() {
        let (assignments, lens) = mixed_inputs();
        let (_, abundance) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(0)).unwrap();
        assert_eq!(abundance.len(), 1);
        assert_eq!(abundance[""], 100.0);
    }

    #[test]
    fn test_unmatched_assignments_counted_not_reported() {
        let (assignments, lens) = mixed_inputs();
        let (totals, abundance) = summarize_taxa(&assignments, &lens, TaxaSlice::Full).unwrap();
        assert_eq!(totals.unmatched_assignments, 1);
        assert!(!abundance.contains_key("Archaea"));
        assert_eq!(totals.total_bases, 10_000);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let (assignments, lens) = mixed_inputs();
        for slice in [TaxaSlice::Full, TaxaSlice::Prefix(0), TaxaSlice::Prefix(1), TaxaSlice::Prefix(2), TaxaSlice::Prefix(7)] {
            let (_, abundance) = summarize_taxa(&assignments, &lens, slice).unwrap();
            let sum: f64 = abundance.values().sum();
            assert!((sum - 100.0).abs() < 1e-9 * 100.0, "{slice}: sum was {sum}");
        }
    }

    #[test]
    fn test_repeated_runs_identical() {
        let (assignments, lens) = mixed_inputs();
        let (_, first) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(2)).unwrap();
        let (_, second) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shallower_buckets_are_unions_of_deeper_ones() {
        let (assignments, lens) = mixed_inputs();
        for k in 0..4usize {
            let (_, shallow) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(k)).unwrap();
            let (_, deep) = summarize_taxa(&assignments, &lens, TaxaSlice::Prefix(k + 1)).unwrap();

            for (taxon, pct) in &shallow {
                let summed: f64 = deep
                    .iter()
                    .filter(|(deeper, _)| TaxaSlice::Prefix(k).truncate(deeper) == *taxon)
                    .map(|(_, p)| p)
                    .sum();
                assert!((summed - pct).abs() < EPS, "depth {k}, taxon {taxon:?}");
            }
        }
    }

    #[test]
    fn test_no_overlap_is_an_error() {
        let assignments = taxa(&[("A", "X;Y")]);
        let lens = lengths(&[("B", 5000)]);

        let err = summarize_taxa(&assignments, &lens, TaxaSlice::Full).unwrap_err();
        match err {
            SummaryError::NoOverlap { assignments, contigs } => {
                assert_eq!(assignments, 1);
                assert_eq!(contigs, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_matched_contigs_are_not_reported_as_disjoint() {
        let assignments = taxa(&[("a", "T1")]);
        let lens = lengths(&[("a", 0), ("b", 4)]);

        let err = summarize_taxa(&assignments, &lens, TaxaSlice::Full).unwrap_err();
        assert!(matches!(err, SummaryError::NoAssignedBases { matched: 1 }), "got {err:?}");
    }

    #[test]
    fn test_empty_contig_next_to_real_one_is_a_zero_bucket() {
        let assignments = taxa(&[("a", "T1"), ("b", "T2")]);
        let lens = lengths(&[("a", 0), ("b", 4)]);

        let (totals, abundance) = summarize_taxa(&assignments, &lens, TaxaSlice::Full).unwrap();
        assert_eq!(totals.matched_contigs, 2);
        assert_eq!(abundance["T1"], 0.0);
        assert_eq!(abundance["T2"], 100.0);
    }

    #[test]
    fn test_empty_inputs_are_an_error() {
        let err = summarize_taxa(&TaxonAssignment::default(), &SequenceLengths::default(), TaxaSlice::Full)
            .unwrap_err();
        assert!(matches!(err, SummaryError::NoOverlap { .. }));
    }
}
