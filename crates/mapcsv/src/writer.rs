/*!
# Mapped Writer

Writes [`Record`]s as positional rows, in the column order of the field list
given at construction.
*/

use crate::{
    config::MapCsvConfig,
    errors::{MapCsvError, MapCsvResult},
    Record,
};
use csv::Writer;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

pub struct MapWriter<W: io::Write> {
    fields: Vec<String>,
    mapping: HashMap<String, usize>,
    writer: Writer<W>,
}

impl MapWriter<File> {
    pub fn from_path<P, I, S>(path: P, fields: I) -> MapCsvResult<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_path_with_config(path, fields, &MapCsvConfig::default())
    }

    pub fn from_path_with_config<P, I, S>(
        path: P,
        fields: I,
        config: &MapCsvConfig,
    ) -> MapCsvResult<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let file = File::create(path)?;
        Ok(Self::with_config(file, fields, config))
    }
}

impl<W: io::Write> MapWriter<W> {
    pub fn new<I, S>(wtr: W, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(wtr, fields, &MapCsvConfig::default())
    }

    /// Wrap `wtr` with the column order given by `fields`
    ///
    /// Nothing is written until [`MapWriter::write_field_names`] or
    /// [`MapWriter::write`] is called. A repeated field name maps to its
    /// last position.
    pub fn with_config<I, S>(wtr: W, fields: I, config: &MapCsvConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let mapping = fields
            .iter()
            .enumerate()
            .map(|(column, name)| (name.clone(), column))
            .collect::<HashMap<_, _>>();

        Self {
            fields,
            mapping,
            writer: config.writer_builder().from_writer(wtr),
        }
    }

    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    /// Write the field list as a row
    ///
    /// Ordering is up to the caller; data rows written earlier stay ahead of it.
    pub fn write_field_names(&mut self) -> MapCsvResult<()> {
        self.writer.write_record(&self.fields)?;
        debug!(fields = ?self.fields, "wrote csv header");
        Ok(())
    }

    /// Write one record as a row without flushing
    ///
    /// Fails with [`MapCsvError::UnknownField`] before anything is written if
    /// the record has a key outside the field list. Fields the record does not
    /// mention are written as empty cells.
    pub fn write(&mut self, record: &Record) -> MapCsvResult<()> {
        let mut row = vec![""; self.fields.len()];
        for (field, value) in record {
            let column = self
                .mapping
                .get(field)
                .ok_or_else(|| MapCsvError::UnknownField {
                    field: field.clone(),
                    valid: self.fields.clone(),
                })?;
            row[*column] = value.as_str();
        }

        self.writer.write_record(&row)?;
        trace!(columns = row.len(), "wrote csv row");
        Ok(())
    }

    /// Write every record in order, then flush once
    ///
    /// Stops at the first failure; rows already written are left in place and
    /// no flush is attempted.
    pub fn write_all<'a, I>(&mut self, records: I) -> MapCsvResult<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut count = 0usize;
        for record in records {
            self.write(record)?;
            count += 1;
        }

        self.flush()?;
        debug!(rows = count, "flushed csv rows");
        Ok(())
    }

    pub fn flush(&mut self) -> MapCsvResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink
    pub fn into_inner(self) -> MapCsvResult<W> {
        self.writer
            .into_inner()
            .map_err(|err| MapCsvError::Io(err.into_error()))
    }
}
