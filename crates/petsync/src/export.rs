//! Tabular export of normalized animals.
//!
//! The mapping table's column order is authoritative: the header row is
//! `columns()` verbatim and every animal row is its projection onto
//! those columns.

use std::fs::File;
use std::path::Path;

use adoptapet::MappingTable;
use anyhow::Result;
use normalizer::NormalizedAnimal;

pub struct CsvExporter {
    writer: csv::Writer<File>,
}

impl CsvExporter {
    /// Create the export file and write the header row.
    pub fn create(path: &Path, table: &MappingTable) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(table.columns())?;
        Ok(Self { writer })
    }

    /// Append one animal as a row in column order.
    pub fn write_animal(
        &mut self,
        animal: &NormalizedAnimal,
        table: &MappingTable,
    ) -> Result<()> {
        self.writer
            .write_record(animal.to_record(table).iter().map(|(_, value)| value))?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
