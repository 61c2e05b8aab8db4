use crate::table::types::Table;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes tables as JSON Lines, one object per row with keys in column order
pub struct TableWriter<W: Write> {
    writer: W,
}

impl TableWriter<std::fs::File> {
    /// Create a writer that truncates or creates `path`
    pub fn create<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(TableWriter::new(file))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter { writer }
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for record in table.records() {
            let json = serde_json::to_string(&record)
                .context("Failed to serialize row")?;
            writeln!(self.writer, "{}", json)
                .context("Failed to write row")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::types::Row;
    use serde_json::json;

    #[test]
    fn test_write_table() {
        let mut table = Table::new("customers", vec!["id".to_string(), "firstName".to_string()]);
        table.push(Row::new(vec![json!("c1"), json!("Alice")]));
        table.push(Row::new(vec![json!("c2"), json!("")]));

        let mut buffer = Vec::new();
        let mut writer = TableWriter::new(&mut buffer);
        writer.write_table(&table).unwrap();
        writer.flush().unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"id":"c1","firstName":"Alice"}"#);
        assert_eq!(lines[1], r#"{"id":"c2","firstName":""}"#);
    }

    #[test]
    fn test_write_empty_table() {
        let table = Table::new("orders", vec!["orderId".to_string()]);
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer).write_table(&table).unwrap();
        assert!(buffer.is_empty());
    }
}
