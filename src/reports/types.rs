//! Data types shared by reports and renderers.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::reports::rounding::round_mean;

/// One CSV row, keyed by header name.
pub type Record = HashMap<String, String>;

/// Grades collected for a single student, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAggregate {
    pub name: String,
    pub grades: Vec<i64>,
}

impl StudentAggregate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grades: Vec::new(),
        }
    }

    pub fn push(&mut self, grade: i64) {
        self.grades.push(grade);
    }

    pub fn count(&self) -> usize {
        self.grades.len()
    }

    pub fn sum(&self) -> i128 {
        self.grades.iter().map(|&g| g as i128).sum()
    }

    /// Mean grade rounded to two decimals, `None` without grades.
    pub fn average(&self) -> Option<Average> {
        round_mean(self.sum(), self.count())
    }
}

/// A value with exactly two decimal places, stored as hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Average(i128);

impl Average {
    pub fn from_hundredths(hundredths: i128) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(self) -> i128 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Prints the shortest decimal form: `4`, `4.5`, `3.75`.
impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (whole, frac) = (abs / 100, abs % 100);
        match frac {
            0 => write!(f, "{sign}{whole}"),
            f10 if f10 % 10 == 0 => write!(f, "{sign}{whole}.{}", f10 / 10),
            _ => write!(f, "{sign}{whole}.{frac:02}"),
        }
    }
}

/// One line of the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub rank: usize,
    pub name: String,
    pub average: Average,
}

impl RankedRow {
    pub fn into_cells(self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.rank as i64),
            Cell::Text(self.name),
            Cell::Number(self.average.as_f64()),
        ]
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Integer(_) | Cell::Number(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

/// Headers plus rows, the sole output of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_average() {
        let mut student = StudentAggregate::new("Иванов Иван");
        assert_eq!(student.average(), None);

        student.push(5);
        student.push(4);
        assert_eq!(student.count(), 2);
        assert_eq!(student.sum(), 9);
        assert_eq!(student.average(), Some(Average::from_hundredths(450)));
    }

    #[test]
    fn test_average_display() {
        assert_eq!(Average::from_hundredths(400).to_string(), "4");
        assert_eq!(Average::from_hundredths(450).to_string(), "4.5");
        assert_eq!(Average::from_hundredths(375).to_string(), "3.75");
        assert_eq!(Average::from_hundredths(407).to_string(), "4.07");
        assert_eq!(Average::from_hundredths(-50).to_string(), "-0.5");
        assert_eq!(Average::from_hundredths(0).to_string(), "0");
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Integer(1).to_string(), "1");
        assert_eq!(Cell::Number(4.5).to_string(), "4.5");
        assert_eq!(Cell::Number(4.0).to_string(), "4");
        assert_eq!(Cell::Text("Тест".into()).to_string(), "Тест");
    }

    #[test]
    fn test_ranked_row_cells() {
        let row = RankedRow {
            rank: 2,
            name: "Власова Алина".to_string(),
            average: Average::from_hundredths(433),
        };
        assert_eq!(
            row.into_cells(),
            vec![
                Cell::Integer(2),
                Cell::Text("Власова Алина".to_string()),
                Cell::Number(4.33),
            ]
        );
    }

    #[test]
    fn test_table_serializes_cells_untagged() {
        let table = ReportTable {
            headers: vec!["".into(), "student_name".into(), "grade".into()],
            rows: vec![vec![
                Cell::Integer(1),
                Cell::Text("A".into()),
                Cell::Number(4.5),
            ]],
        };
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "headers": ["", "student_name", "grade"],
                "rows": [[1, "A", 4.5]],
            })
        );
    }
}
