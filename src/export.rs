//! CSV export of twin pairs.
//!
//! Columns are index (1-based), first prime, second prime and their
//! difference. Lines end with `\n`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sieve::TwinPair;

/// Header row of every export.
pub const CSV_HEADER: &str = "Índice,Primer Primo,Segundo Primo,Diferencia";

/// Write `pairs` as CSV to `writer`.
///
/// Returns the number of data rows written (the header is not counted).
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if writing fails.
pub fn write_csv<W: Write>(mut writer: W, pairs: &[TwinPair]) -> Result<usize> {
    writeln!(writer, "{CSV_HEADER}")?;
    for (i, pair) in pairs.iter().enumerate() {
        writeln!(
            writer,
            "{},{},{},{}",
            i + 1,
            pair.first(),
            pair.second(),
            TwinPair::GAP
        )?;
    }
    writer.flush()?;
    Ok(pairs.len())
}

/// Write `pairs` as CSV to a file, replacing it if it exists.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be created or written.
pub fn export_csv<P: AsRef<Path>>(path: P, pairs: &[TwinPair]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let rows = write_csv(BufWriter::new(file), pairs)?;
    tracing::info!("exported {} twin pairs to {}", rows, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::generate_twin_primes;

    #[test]
    fn test_write_csv_limit_20() {
        let mut buf = Vec::new();
        let rows = write_csv(&mut buf, &generate_twin_primes(20).unwrap()).unwrap();
        assert_eq!(rows, 4);

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Índice,Primer Primo,Segundo Primo,Diferencia\n\
             1,3,5,2\n\
             2,5,7,2\n\
             3,11,13,2\n\
             4,17,19,2\n"
        );
    }

    #[test]
    fn test_write_csv_empty() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_export_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twins.csv");
        let rows = export_csv(&path, &generate_twin_primes(100).unwrap()).unwrap();
        assert_eq!(rows, 8);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 9);
        assert_eq!(text.lines().last(), Some("8,71,73,2"));
    }

    #[test]
    fn test_export_csv_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("twins.csv");
        assert!(matches!(
            export_csv(&path, &[]),
            Err(crate::Error::Io(_))
        ));
    }
}
