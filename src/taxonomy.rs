//src/taxonomy.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use flate2::read::MultiGzDecoder;

use crate::error::{SummaryError, SummaryResult};
use crate::types::TaxonAssignment;

/// Parses a kraken-translate style file:
/// ```text
/// <contig id>\t<lineage;separated;by;semicolons>[\t<ignored>...]
/// ```
/// Lines are trimmed before splitting; lines with fewer than two fields are
/// skipped. A `.gz` file is decompressed on the fly. Duplicate ids keep the
/// last lineage seen.
pub fn read_taxon_assignments<P: AsRef<Path>>(path: P) -> SummaryResult<TaxonAssignment> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SummaryError::FileNotFound {
            kind: "kraken",
            path: path.to_path_buf(),
        });
    }
    let io_err = |source: std::io::Error| SummaryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let f = File::open(path).map_err(io_err)?;
    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let mut taxa: TaxonAssignment = AHashMap::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        let mut fields = line.trim().split('\t');

        let (Some(contig_id), Some(lineage)) = (fields.next(), fields.next()) else {
            skipped += 1;
            continue;
        };

        if let Some(previous) = taxa.insert(contig_id.to_string(), lineage.to_string()) {
            log::warn!("duplicate taxonomy entry for {contig_id}: replacing {previous:?} with {lineage:?}");
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} lines with fewer than two fields in {}", path.display());
    }
    log::info!("read {} taxon assignments from {}", taxa.len(), path.display());
    Ok(taxa)
}
