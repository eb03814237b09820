//! Student performance ranking: average grade per student, best first.

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::error::Result;
use crate::reports::Report;
use crate::reports::types::{RankedRow, Record, ReportTable, StudentAggregate};

pub const STUDENT_NAME_FIELD: &str = "student_name";
pub const GRADE_FIELD: &str = "grade";

/// Ranks students by their average grade.
///
/// Records without a `student_name`, without a `grade`, or whose grade is
/// not an integer are skipped. Students with equal rounded averages keep
/// the order in which their first valid record appeared.
#[derive(Debug, Default, Clone, Copy)]
pub struct StudentPerformanceReport;

impl StudentPerformanceReport {
    pub const NAME: &'static str = "student-performance";

    pub fn new() -> Self {
        Self
    }

    pub fn headers() -> Vec<String> {
        vec![
            String::new(),
            STUDENT_NAME_FIELD.to_string(),
            GRADE_FIELD.to_string(),
        ]
    }

    /// Groups grades by student and returns the ranking, rank 1 first.
    pub fn rank_students(&self, records: &[Record]) -> Vec<RankedRow> {
        let mut averages: Vec<_> = group_grades(records)
            .into_iter()
            .filter_map(|student| {
                let average = student.average()?;
                Some((student.name, average))
            })
            .collect();

        // stable, so ties stay in first-seen order
        averages.sort_by(|a, b| b.1.cmp(&a.1));

        averages
            .into_iter()
            .enumerate()
            .map(|(i, (name, average))| RankedRow {
                rank: i + 1,
                name,
                average,
            })
            .collect()
    }
}

impl Report for StudentPerformanceReport {
    #[tracing::instrument(skip_all, fields(report = Self::NAME, records = records.len()))]
    fn generate(&self, records: &[Record]) -> Result<ReportTable> {
        let ranking = self.rank_students(records);
        debug!(students = ranking.len(), "Students ranked");

        let mut table = ReportTable::new(Self::headers());
        table.rows = ranking.into_iter().map(RankedRow::into_cells).collect();
        Ok(table)
    }
}

/// Collects valid grades per student, in order of first appearance.
fn group_grades(records: &[Record]) -> Vec<StudentAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut students: Vec<StudentAggregate> = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in records.iter().enumerate() {
        let Some((name, grade)) = parse_record(record) else {
            trace!(row, "Skipping record without a usable student_name/grade");
            skipped += 1;
            continue;
        };

        let slot = *index.entry(name).or_insert_with(|| {
            students.push(StudentAggregate::new(name));
            students.len() - 1
        });
        students[slot].push(grade);
    }

    if skipped > 0 {
        debug!(skipped, "Records skipped");
    }
    students
}

fn parse_record(record: &Record) -> Option<(&str, i64)> {
    let name = record.get(STUDENT_NAME_FIELD)?;
    let grade = parse_grade(record.get(GRADE_FIELD)?)?;
    Some((name.as_str(), grade))
}

/// Parses an integer grade, ignoring surrounding whitespace.
fn parse_grade(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
