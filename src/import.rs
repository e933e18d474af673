use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::models::StudentRecord;

pub fn read_students(csv_path: &Path) -> anyhow::Result<Vec<StudentRecord>> {
    let file = File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    read_students_from(file)
}

pub fn read_students_from<R: Read>(input: R) -> anyhow::Result<Vec<StudentRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let mut students = Vec::new();

    for (index, result) in reader.deserialize::<StudentRecord>().enumerate() {
        // Line 1 is the header row.
        let row = result.with_context(|| format!("invalid student record on line {}", index + 2))?;
        students.push(row);
    }

    Ok(students)
}
