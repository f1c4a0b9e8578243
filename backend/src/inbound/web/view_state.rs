//! View state for the registry page.
//!
//! The page is rendered on the server, so the state a browser would keep in
//! memory travels in query parameters and hidden form fields instead. The
//! types here turn those raw strings back into transitions:
//!
//! ```text
//! idle --Edit--> editing --submit/cancel--> idle
//! idle --Delete--> armed(id) --Delete same row--> confirmed --> idle
//!                  armed(id) --Delete other row--> armed(other)
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::domain::{Error, Gender, NewStudent, Student, StudentId};
use crate::inbound::http::validation::{parse_new_student, parse_student_id};

/// Form draft exactly as typed, plus the id of the row being edited.
///
/// Kept as raw strings so a rejected submission can be shown back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    /// Edit target; blank while creating.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            gender: Gender::default().as_str().to_owned(),
        }
    }
}

impl StudentForm {
    /// Empty draft for a new student.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing row.
    pub fn editing(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name().to_owned(),
            email: student.email().to_owned(),
            phone: student.phone().to_owned(),
            gender: student.gender().as_str().to_owned(),
        }
    }

    /// Whether submitting updates an existing row.
    pub fn is_editing(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Validate the draft and decide which request it becomes.
    pub fn submission(&self) -> Result<Submission, Error> {
        let details = parse_new_student(&self.name, &self.email, &self.phone, &self.gender)?;
        if self.is_editing() {
            let id = parse_student_id(Some(&self.id))?;
            Ok(Submission::Update(Student::new(id, details)))
        } else {
            Ok(Submission::Create(details))
        }
    }
}

/// Request a valid form turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewStudent),
    Update(Student),
}

impl Submission {
    /// Notice shown once the request succeeds.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Create(_) => Notice::Added,
            Self::Update(_) => Notice::Updated,
        }
    }
}

/// Two-click delete state. At most one row is armed at a time and the armed
/// state never expires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    Armed(StudentId),
}

/// Outcome of clicking a row's delete button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteClick {
    /// First click on this row: ask for confirmation.
    Armed(StudentId),
    /// Second click on the armed row: delete it.
    Confirmed(StudentId),
}

impl DeleteState {
    /// Restore the state carried in a hidden field or query parameter.
    ///
    /// Blank or malformed values mean nothing is armed.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| StudentId::new(value).ok())
            .map_or(Self::Idle, Self::Armed)
    }

    /// Whether `id` is the armed row.
    pub fn is_armed(&self, id: &StudentId) -> bool {
        matches!(self, Self::Armed(armed) if armed == id)
    }

    /// Identifier to carry forward, if any.
    pub fn armed_id(&self) -> Option<&StudentId> {
        match self {
            Self::Idle => None,
            Self::Armed(id) => Some(id),
        }
    }

    /// Apply a click on `id`'s delete button.
    pub fn click(&self, id: StudentId) -> DeleteClick {
        if self.is_armed(&id) {
            DeleteClick::Confirmed(id)
        } else {
            DeleteClick::Armed(id)
        }
    }
}

/// Success banner shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
    Deleted,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Student added successfully",
            Self::Updated => "Student updated successfully",
            Self::Deleted => "Student deleted successfully",
        }
    }

    /// Value of the `notice` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl FromStr for Notice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Added, Self::Updated, Self::Deleted]
            .into_iter()
            .find(|notice| notice.as_param() == s)
            .ok_or(())
    }
}
