//! Three-column lineage table.
//!
//! The paternal and maternal series are interleaved by time. Points whose
//! times differ by less than [`TIME_EPSILON`] share a row; otherwise the
//! column of the series without a point at that time is left blank.

use pedigree_core::CoalescencePoint;
use std::io::{self, Write};

/// Tolerance for treating two times as the same row.
pub const TIME_EPSILON: f64 = 1e-6;

/// Header line of the table.
pub const HEADER: &str = "Time\tPaternal_Lineages\tMaternal_Lineages";

/// One printed row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub time: f64,
    pub paternal: Option<usize>,
    pub maternal: Option<usize>,
}

impl TableRow {
    /// Renders the row without its trailing newline.
    pub fn render(&self) -> String {
        match (self.paternal, self.maternal) {
            (Some(p), Some(m)) => format!("{:.2}\t{}\t\t{}", self.time, p, m),
            (Some(p), None) => format!("{:.2}\t{}\t\t", self.time, p),
            (None, Some(m)) => format!("{:.2}\t\t\t{}", self.time, m),
            (None, None) => format!("{:.2}\t\t\t", self.time),
        }
    }
}

/// Interleaves the two series.
///
/// Both are walked in their produced order; at each step the earlier head
/// is emitted, and heads within [`TIME_EPSILON`] are emitted together.
pub fn merge_series(paternal: &[CoalescencePoint], maternal: &[CoalescencePoint]) -> Vec<TableRow> {
    let mut rows = Vec::with_capacity(paternal.len() + maternal.len());
    let (mut i, mut j) = (0, 0);

    loop {
        let row = match (paternal.get(i), maternal.get(j)) {
            (Some(p), Some(m)) if (p.time - m.time).abs() < TIME_EPSILON => {
                i += 1;
                j += 1;
                TableRow {
                    time: p.time,
                    paternal: Some(p.lineages),
                    maternal: Some(m.lineages),
                }
            }
            (Some(p), Some(m)) if p.time < m.time => {
                i += 1;
                paternal_only(p)
            }
            (Some(_), Some(m)) | (None, Some(m)) => {
                j += 1;
                maternal_only(m)
            }
            (Some(p), None) => {
                i += 1;
                paternal_only(p)
            }
            (None, None) => break,
        };
        rows.push(row);
    }

    rows
}

fn paternal_only(p: &CoalescencePoint) -> TableRow {
    TableRow {
        time: p.time,
        paternal: Some(p.lineages),
        maternal: None,
    }
}

fn maternal_only(m: &CoalescencePoint) -> TableRow {
    TableRow {
        time: m.time,
        paternal: None,
        maternal: Some(m.lineages),
    }
}

/// Writes the header and every row.
pub fn write_table<W: Write>(out: &mut W, rows: &[TableRow]) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    for row in rows {
        writeln!(out, "{}", row.render())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, usize)]) -> Vec<CoalescencePoint> {
        pairs.iter().map(|&(t, n)| CoalescencePoint::new(t, n)).collect()
    }

    #[test]
    fn test_shared_start_row() {
        let rows = merge_series(&series(&[(0.0, 3)]), &series(&[(0.0, 5)]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].render(), "0.00\t3\t\t5");
    }

    #[test]
    fn test_blank_columns() {
        let paternal = TableRow {
            time: 12.345,
            paternal: Some(2),
            maternal: None,
        };
        let maternal = TableRow {
            time: 7.0,
            paternal: None,
            maternal: Some(4),
        };
        assert_eq!(paternal.render(), "12.35\t2\t\t");
        assert_eq!(maternal.render(), "7.00\t\t\t4");
    }

    #[test]
    fn test_epsilon_equality() {
        let rows = merge_series(&series(&[(10.0, 1)]), &series(&[(10.0 + 5e-7, 2)]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].paternal, Some(1));
        assert_eq!(rows[0].maternal, Some(2));

        let rows = merge_series(&series(&[(10.0, 1)]), &series(&[(10.0 + 1e-5, 2)]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_interleaving_follows_heads() {
        let paternal = series(&[(0.0, 3), (80.0, 2), (40.0, 1)]);
        let maternal = series(&[(0.0, 2), (60.0, 1)]);
        let rows = merge_series(&paternal, &maternal);

        let rendered: Vec<String> = rows.iter().map(TableRow::render).collect();
        assert_eq!(
            rendered,
            vec![
                "0.00\t3\t\t2".to_string(),
                "60.00\t\t\t1".to_string(),
                "80.00\t2\t\t".to_string(),
                "40.00\t1\t\t".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_side_empty() {
        let rows = merge_series(&series(&[(0.0, 0)]), &[]);
        assert_eq!(rows, vec![TableRow { time: 0.0, paternal: Some(0), maternal: None }]);
    }

    #[test]
    fn test_write_table() {
        let rows = merge_series(&series(&[(0.0, 1), (5.5, 0)]), &series(&[(0.0, 0)]));
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Time\tPaternal_Lineages\tMaternal_Lineages\n0.00\t1\t\t0\n5.50\t0\t\t\n"
        );
    }
}
