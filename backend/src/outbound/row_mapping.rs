//! Conversion of raw store columns into domain students.
//!
//! Both database adapters read the same five columns. Rows written by other
//! tools may carry an unrecognised gender, which is read as `Other`, or blank
//! text, which is passed through as stored.

use tracing::warn;
use uuid::Uuid;

use crate::domain::{Gender, NewStudent, Student, StudentId};

/// Build a [`Student`] from store columns.
pub(crate) fn student_from_columns(
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    gender: &str,
) -> Student {
    let gender = gender.parse::<Gender>().unwrap_or_else(|_| {
        warn!(value = gender, student_id = %id, "unrecognised gender value, defaulting to Other");
        Gender::Other
    });
    if [&name, &email, &phone].iter().any(|text| text.trim().is_empty()) {
        warn!(student_id = %id, "student row has blank text columns");
    }
    Student::new(
        StudentId::from_uuid(id),
        NewStudent::from_stored(name, email, phone, gender),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn columns(name: &str, phone: &str, gender: &str) -> Student {
        student_from_columns(Uuid::nil(), name.into(), "a@x.com".into(), phone.into(), gender)
    }

    #[rstest]
    #[case("Female", Gender::Female)]
    #[case("Male", Gender::Male)]
    #[case("unspecified", Gender::Other)]
    fn reads_gender_leniently(#[case] raw: &str, #[case] expected: Gender) {
        let student = columns("Ann", "1", raw);
        assert_eq!(student.gender(), expected);
        assert_eq!(student.id().as_uuid(), &Uuid::nil());
    }

    #[rstest]
    #[case("  ", "1")]
    #[case("Ann", "")]
    fn blank_text_is_kept_as_stored(#[case] name: &str, #[case] phone: &str) {
        let student = columns(name, phone, "Female");
        assert_eq!(student.name(), name);
        assert_eq!(student.phone(), phone);
        assert_eq!(student.email(), "a@x.com");
    }
}
