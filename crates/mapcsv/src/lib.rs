/*!
# mapcsv

Name-keyed access to CSV data. A [`MapReader`] turns the first row of its
input into a field-index mapping and yields each following row as a
[`Record`]; a [`MapWriter`] does the reverse for an explicit field list.
Parsing, quoting and escaping are left to the `csv` crate.

## Usage

```rust
use mapcsv::{MapCsvResult, MapReader, MapWriter, Record};

fn example() -> MapCsvResult<()> {
    let mut wtr = MapWriter::new(vec![], ["id", "name"]);
    wtr.write_field_names()?;

    let mut alice = Record::new();
    alice.insert("id".to_string(), "1".to_string());
    alice.insert("name".to_string(), "Alice".to_string());
    wtr.write_all([&alice])?;

    let data = wtr.into_inner()?;
    let mut rdr = MapReader::new(data.as_slice())?;
    assert_eq!(rdr.read_all()?, vec![alice]);

    Ok(())
}
# example().unwrap();
```
*/

pub mod config;
pub mod errors;
pub mod reader;
pub mod writer;

use std::collections::HashMap;

/// One row keyed by field name
pub type Record = HashMap<String, String>;

// Re-export main types for convenience
pub use config::MapCsvConfig;
pub use errors::{MapCsvError, MapCsvResult};
pub use reader::MapReader;
pub use writer::MapWriter;
