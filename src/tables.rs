// CSV table loading and saving.
//
// KOHA exports often carry banner rows above the real header, so the
// loader takes a header row offset (0-based; the rows above it are
// skipped). Rows shorter than the header are padded with empty cells so
// positional access downstream never goes out of bounds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Default header row offset for KOHA exports: one banner row, then the
/// header.
pub const DEFAULT_HEADER_ROW: usize = 1;

/// An in-memory table: a header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Load a CSV file, treating row `header_row` (0-based) as the
    /// header and everything below it as data.
    pub fn load(path: &Path, header_row: usize) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for (i, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read row {} of {}", i + 1, path.display()))?;
            if i < header_row {
                continue;
            }
            let cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            if i == header_row {
                headers = cells;
            } else {
                rows.push(cells);
            }
        }

        if headers.is_empty() {
            anyhow::bail!(
                "No header row found in {} (header row offset {})",
                path.display(),
                header_row
            );
        }

        // Align every row to the header width. Rows wider than the
        // header lose their trailing cells, with a warning — never
        // silently.
        let width = headers.len();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                warn!(
                    row = i + header_row + 2,
                    dropped = row.len() - width,
                    "Row wider than the header; dropping trailing cells"
                );
                row.truncate(width);
            }
            while row.len() < width {
                row.push(String::new());
            }
        }

        info!(
            rows = rows.len(),
            columns = headers.len(),
            path = %path.display(),
            "Loaded table"
        );

        Ok(Self { headers, rows })
    }

    /// Write the table to `path` as CSV, header first.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        writer
            .write_record(&self.headers)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.write_record(row).context("Failed to write CSV row")?;
        }
        writer.flush().context("Failed to flush CSV output")?;

        info!(rows = self.rows.len(), path = %path.display(), "Wrote table");
        Ok(())
    }
}

/// Derived output paths for a cleaning run: processed rows and
/// discarded rows, named after the input file.
pub fn output_paths(input: &Path, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "salida".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());
    (
        dir.join(format!("{stem}_procesado.csv")),
        dir.join(format!("{stem}_descartados.csv")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_skips_banner_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(
            &path,
            "Reporte KOHA,,\nTítulo principal,Fecha de publicación,Biblioteca_1\nLibro,2020,Central\n",
        )
        .unwrap();

        let table = Table::load(&path, 1).unwrap();
        assert_eq!(table.headers[0], "Título principal");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], "Central");
    }

    #[test]
    fn load_pads_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corto.csv");
        std::fs::write(&path, "a,b,c\n1,2\n").unwrap();

        let table = Table::load(&path, 0).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn load_truncates_long_rows_to_header_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("largo.csv");
        std::fs::write(&path, "a,b\n1,2,3,4\n5,6\n").unwrap();

        let table = Table::load(&path, 0).unwrap();
        assert_eq!(table.rows[0], vec!["1", "2"]);
        assert_eq!(table.rows[1], vec!["5", "6"]);
    }

    #[test]
    fn load_fails_when_header_row_past_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacio.csv");
        std::fs::write(&path, "a,b\n").unwrap();

        assert!(Table::load(&path, 5).is_err());
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salida.csv");
        let table = Table {
            headers: vec!["x".into(), "y".into()],
            rows: vec![vec!["1".into(), "dos, tres".into()]],
        };
        table.save(&path).unwrap();

        let reloaded = Table::load(&path, 0).unwrap();
        assert_eq!(reloaded.headers, table.headers);
        assert_eq!(reloaded.rows, table.rows);
    }

    #[test]
    fn output_paths_use_input_stem() {
        let (processed, discarded) = output_paths(Path::new("/data/coleccion.csv"), None);
        assert_eq!(processed, Path::new("/data/coleccion_procesado.csv"));
        assert_eq!(discarded, Path::new("/data/coleccion_descartados.csv"));
    }

    #[test]
    fn output_paths_honor_output_dir() {
        let (processed, _) =
            output_paths(Path::new("/data/coleccion.csv"), Some(Path::new("/tmp/out")));
        assert_eq!(processed, Path::new("/tmp/out/coleccion_procesado.csv"));
    }
}
