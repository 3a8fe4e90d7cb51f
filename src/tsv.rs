//! Tab-separated tables with a header row

use crate::error::{Result, TreeError};
use memchr::memchr_iter;

/// Split a line on tabs
pub(crate) fn split_tabs(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(10);
    let mut start = 0;
    for pos in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[start..pos]);
        start = pos + 1;
    }
    fields.push(&line[start..]);
    fields
}

pub(crate) struct TsvTable<'a> {
    header: Vec<&'a str>,
    /// (1-based line number, fields)
    rows: Vec<(usize, Vec<&'a str>)>,
}

impl<'a> TsvTable<'a> {
    /// Parse a table; blank lines are skipped
    pub(crate) fn parse(text: &'a str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| TreeError::parse(1, "table has no header row"))?;
        let header: Vec<&str> = split_tabs(header_line).into_iter().map(str::trim).collect();

        let mut rows = Vec::new();
        for (line_num, line) in lines {
            let fields = split_tabs(line);
            if fields.len() < header.len() {
                return Err(TreeError::parse(
                    line_num,
                    format!("expected {} columns, found {}", header.len(), fields.len()),
                ));
            }
            rows.push((line_num, fields));
        }
        Ok(Self { header, rows })
    }

    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| *h == name)
    }

    pub(crate) fn require(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| TreeError::parse(1, format!("missing column `{name}`")))
    }

    pub(crate) fn rows(&self) -> &[(usize, Vec<&'a str>)] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tabs() {
        assert_eq!(split_tabs("a\tb\t\tc"), vec!["a", "b", "", "c"]);
        assert_eq!(split_tabs("a"), vec!["a"]);
        assert_eq!(split_tabs(""), vec![""]);
    }

    #[test]
    fn test_parse_table() {
        let text = "x\ty\n1\t2\n\n3\t4\n";
        let table = TsvTable::parse(text).unwrap();
        assert_eq!(table.column("y"), Some(1));
        assert!(table.require("z").is_err());
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].0, 4);
        assert_eq!(table.rows()[1].1, vec!["3", "4"]);
    }

    #[test]
    fn test_short_row() {
        let err = TsvTable::parse("x\ty\n1\n").err().unwrap();
        assert!(matches!(err, TreeError::Parse { line_num: 2, .. }));
    }

    #[test]
    fn test_empty_table() {
        assert!(TsvTable::parse("").is_err());
    }
}
