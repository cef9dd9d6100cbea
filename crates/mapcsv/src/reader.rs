/*!
# Mapped Reader

Consumes the first row of the input as the header and yields every following
row as a [`Record`] keyed by header name.
*/

use crate::{
    config::MapCsvConfig,
    errors::{MapCsvError, MapCsvResult},
    Record,
};
use csv::{Reader, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

pub struct MapReader<R> {
    fields: Vec<String>,
    mapping: HashMap<String, usize>,
    reader: Reader<R>,
    // Row scratch space; never handed out.
    row: StringRecord,
}

impl MapReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> MapCsvResult<Self> {
        Self::from_path_with_config(path, &MapCsvConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(
        path: P,
        config: &MapCsvConfig,
    ) -> MapCsvResult<Self> {
        let file = File::open(path)?;
        Self::with_config(file, config)
    }
}

impl<R: io::Read> MapReader<R> {
    /// Read the header row from `rdr` using the default dialect
    pub fn new(rdr: R) -> MapCsvResult<Self> {
        Self::with_config(rdr, &MapCsvConfig::default())
    }

    /// Read the header row from `rdr`
    ///
    /// Fails with [`MapCsvError::MissingHeader`] when the input holds no rows.
    /// A field name repeated in the header maps to its last column.
    pub fn with_config(rdr: R, config: &MapCsvConfig) -> MapCsvResult<Self> {
        let mut reader = config.reader_builder().from_reader(rdr);

        let mut header = StringRecord::new();
        if !reader.read_record(&mut header)? {
            return Err(MapCsvError::MissingHeader);
        }

        let fields: Vec<String> = header.iter().map(str::to_string).collect();
        let mapping = fields
            .iter()
            .enumerate()
            .map(|(column, name)| (name.clone(), column))
            .collect::<HashMap<_, _>>();

        debug!(fields = ?fields, "read csv header");

        Ok(Self {
            fields,
            mapping,
            reader,
            row: StringRecord::new(),
        })
    }

    /// Header names in their original column order
    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    /// Line number of the last row read
    pub fn line(&self) -> u64 {
        self.row
            .position()
            .map(|pos| pos.line())
            .unwrap_or_else(|| self.reader.position().line())
    }

    /// Read the next data row
    ///
    /// Returns `Ok(None)` at end of input. Every returned record is a fresh
    /// allocation owned by the caller.
    pub fn read(&mut self) -> MapCsvResult<Option<Record>> {
        if !self.reader.read_record(&mut self.row)? {
            return Ok(None);
        }

        let mut record = Record::with_capacity(self.mapping.len());
        for (field, &column) in &self.mapping {
            let value = self.row.get(column).ok_or_else(|| MapCsvError::ShortRow {
                field: field.clone(),
                column,
                len: self.row.len(),
                line: self.line(),
            })?;
            record.insert(field.clone(), value.to_string());
        }

        trace!(line = self.line(), "read csv row");
        Ok(Some(record))
    }

    /// Read every remaining data row, in input order
    pub fn read_all(&mut self) -> MapCsvResult<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.read()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl<R: io::Read> Iterator for MapReader<R> {
    type Item = MapCsvResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_becomes_field_names() {
        let rdr = MapReader::new("id,name\n1,Alice\n".as_bytes()).unwrap();
        assert_eq!(rdr.field_names(), &["id", "name"]);
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let result = MapReader::new("".as_bytes());
        assert!(matches!(result, Err(MapCsvError::MissingHeader)));
    }

    #[test]
    fn test_read_maps_columns_by_name() {
        let mut rdr = MapReader::new("id,name\n1,Alice\n2,Bob\n".as_bytes()).unwrap();

        assert_eq!(
            rdr.read().unwrap(),
            Some(record(&[("id", "1"), ("name", "Alice")]))
        );
        assert_eq!(
            rdr.read().unwrap(),
            Some(record(&[("id", "2"), ("name", "Bob")]))
        );
        assert_eq!(rdr.read().unwrap(), None);
        // Stays exhausted.
        assert_eq!(rdr.read().unwrap(), None);
    }

    #[test]
    fn test_returned_records_are_independent() {
        let mut rdr = MapReader::new("id\n1\n2\n".as_bytes()).unwrap();
        let first = rdr.read().unwrap().unwrap();
        let second = rdr.read().unwrap().unwrap();

        assert_eq!(first["id"], "1");
        assert_eq!(second["id"], "2");
    }

    #[test]
    fn test_duplicate_header_last_occurrence_wins() {
        let mut rdr = MapReader::new("a,b,a\n1,2,3\n".as_bytes()).unwrap();

        assert_eq!(rdr.field_names(), &["a", "b", "a"]);
        assert_eq!(
            rdr.read().unwrap(),
            Some(record(&[("a", "3"), ("b", "2")]))
        );
    }

    #[test]
    fn test_read_all_header_only_is_empty() {
        let mut rdr = MapReader::new("id,name\n".as_bytes()).unwrap();
        assert!(rdr.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_column_count_is_read_error() {
        let mut rdr = MapReader::new("id,name\n1,Alice\n2\n".as_bytes()).unwrap();

        assert!(rdr.read().unwrap().is_some());
        let err = rdr.read().unwrap_err();
        assert!(matches!(err, MapCsvError::Csv(_)));
        assert!(err.is_read_error());
    }

    #[test]
    fn test_read_all_discards_partial_results_on_error() {
        let mut rdr = MapReader::new("id,name\n1,Alice\n2\n3,Carol\n".as_bytes()).unwrap();
        assert!(rdr.read_all().is_err());
    }

    #[test]
    fn test_flexible_short_row() {
        let config = MapCsvConfig::default().flexible(true);
        let mut rdr = MapReader::with_config("id,name\n1\n".as_bytes(), &config).unwrap();

        match rdr.read().unwrap_err() {
            MapCsvError::ShortRow {
                field, column, len, line,
            } => {
                assert_eq!(field, "name");
                assert_eq!(column, 1);
                assert_eq!(len, 1);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_flexible_long_row_ignores_extra_cells() {
        let config = MapCsvConfig::default().flexible(true);
        let mut rdr = MapReader::with_config("id\n1,extra\n".as_bytes(), &config).unwrap();
        assert_eq!(rdr.read().unwrap(), Some(record(&[("id", "1")])));
    }

    #[test]
    fn test_iterator_yields_records_in_order() {
        let rdr = MapReader::new("n\n1\n2\n3\n".as_bytes()).unwrap();
        let values: Vec<String> = rdr.map(|r| r.unwrap()["n"].clone()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_comment_and_trim() {
        let config = MapCsvConfig::default().comment(Some(b'#')).trim(true);
        let mut rdr =
            MapReader::with_config("id, name\n# skipped\n1,  Alice \n".as_bytes(), &config).unwrap();

        assert_eq!(rdr.field_names(), &["id", "name"]);
        assert_eq!(
            rdr.read_all().unwrap(),
            vec![record(&[("id", "1"), ("name", "Alice")])]
        );
    }
}
