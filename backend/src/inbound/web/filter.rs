//! Search filter applied to the fetched list before rendering.

use crate::domain::Student;

/// Rows whose name or email contains `search` ignoring case, or whose phone
/// contains it verbatim. A blank search keeps every row.
pub fn filter_students<'a>(students: &'a [Student], search: &str) -> Vec<&'a Student> {
    let needle = search.trim();
    if needle.is_empty() {
        return students.iter().collect();
    }
    let folded = needle.to_lowercase();
    students
        .iter()
        .filter(|student| {
            student.name().to_lowercase().contains(&folded)
                || student.email().to_lowercase().contains(&folded)
                || student.phone().contains(needle)
        })
        .collect()
}
