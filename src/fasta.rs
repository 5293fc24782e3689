// src/fasta.rs

use std::path::Path;

use ahash::AHashMap;
use needletail::parse_fastx_file;
use needletail::parser::Format;

use crate::error::{SummaryError, SummaryResult};
use crate::types::{GenomeSizes, SequenceLengths};

/// Reads a (optionally compressed) FASTA file into `identifier -> length`.
///
/// The identifier is the first whitespace-delimited token of the header.
/// When an identifier occurs more than once the last record wins.
pub fn read_sequence_lengths<P: AsRef<Path>>(path: P) -> SummaryResult<SequenceLengths> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SummaryError::FileNotFound {
            kind: "fasta",
            path: path.to_path_buf(),
        });
    }

    let parse_err = |e: needletail::errors::ParseError| SummaryError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = parse_fastx_file(path).map_err(parse_err)?;
    let mut lengths: SequenceLengths = AHashMap::new();
    let mut records = 0usize;

    while let Some(record) = reader.next() {
        let record = record.map_err(parse_err)?;
        if matches!(record.format(), Format::Fastq) {
            return Err(SummaryError::Parse {
                path: path.to_path_buf(),
                message: "expected FASTA records, found FASTQ".to_string(),
            });
        }
        let id = record_id(record.id());
        let len = residue_count(&record.seq());
        records += 1;

        if let Some(previous) = lengths.insert(id.clone(), len) {
            log::warn!(
                "duplicate FASTA identifier {id} in {}: keeping last record ({len} bp, replaced {previous} bp)",
                path.display()
            );
        }
    }

    log::info!(
        "read {records} records ({} distinct ids) from {}",
        lengths.len(),
        path.display()
    );
    Ok(lengths)
}

/// Drops contigs shorter than `size_cutoff` and reports genome sizes
/// before and after the cut.
pub fn apply_size_cutoff(lengths: SequenceLengths, size_cutoff: u64) -> (SequenceLengths, GenomeSizes) {
    let mut sizes = GenomeSizes {
        total_contigs: lengths.len(),
        ..GenomeSizes::default()
    };
    let mut filtered: SequenceLengths = AHashMap::with_capacity(lengths.len());

    for (id, len) in lengths {
        sizes.total_genome_length += len;
        if len < size_cutoff {
            continue;
        }
        sizes.filtered_genome_length += len;
        filtered.insert(id, len);
    }
    sizes.filtered_contigs = filtered.len();

    log::info!(
        "{} of {} contigs are >= {size_cutoff} bp ({} of {} bp)",
        sizes.filtered_contigs,
        sizes.total_contigs,
        sizes.filtered_genome_length,
        sizes.total_genome_length
    );
    (filtered, sizes)
}

fn record_id(header: &[u8]) -> String {
    let header = String::from_utf8_lossy(header);
    header.split_whitespace().next().unwrap_or_default().to_string()
}

/// Character count of a sequence; equal to the byte length for plain ASCII.
fn residue_count(seq: &[u8]) -> u64 {
    if seq.is_ascii() {
        seq.len() as u64
    } else {
        String::from_utf8_lossy(seq).chars().count() as u64
    }
}
