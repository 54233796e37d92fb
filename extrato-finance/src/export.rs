//! Tabular export of extracted records (CSV).
//!
//! Columns: Data, Movimento, Historico, Valor, Debito, Credito.
//! Rows are ordered by date; rows whose date does not parse go last.

use extrato_core::{parse_canonical_date, TransactionRecord};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;

pub const EXPORT_COLUMNS: [&str; 6] = ["Data", "Movimento", "Historico", "Valor", "Debito", "Credito"];

/// Where an export for one document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub stem: String,
}

impl ExportTarget {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// Target named after a source document (`extrato.pdf` → `extrato_processado.csv`).
    pub fn for_document(dir: impl Into<PathBuf>, document: &Path) -> Self {
        let stem = document
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "extrato".to_string());
        Self::new(dir, stem)
    }

    pub fn file_name(&self) -> String {
        format!("{}_processado.csv", self.stem)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }
}

/// Records in export order: ascending date, unparseable dates last, stable.
pub fn sorted_for_export(records: &[TransactionRecord]) -> Vec<&TransactionRecord> {
    let mut rows: Vec<&TransactionRecord> = records.iter().collect();
    rows.sort_by_key(|r| {
        let date = parse_canonical_date(&r.date);
        (date.is_none(), date)
    });
    rows
}

pub fn write_csv<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(EXPORT_COLUMNS)?;
    }
    for record in sorted_for_export(records) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the export file. Returns the file name, or `None` when there is
/// nothing to write.
pub fn save_export(target: &ExportTarget, records: &[TransactionRecord]) -> Result<Option<String>> {
    if records.is_empty() {
        warn!("no records to export");
        return Ok(None);
    }

    fs::create_dir_all(&target.dir)?;
    let path = target.path();
    let file = fs::File::create(&path)?;
    write_csv(file, records)?;

    info!("export saved to {}", path.display());
    Ok(Some(target.file_name()))
}
