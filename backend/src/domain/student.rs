//! Student record model.
//!
//! A [`Student`] is the only aggregate in the registry. Its fields are plain
//! text apart from the identifier and [`Gender`]; the only invariants are that
//! the text fields are present and the identifier is a UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when constructing student values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    EmptyEmail,
    EmptyPhone,
    UnknownGender { value: String },
}

impl StudentValidationError {
    /// Name of the offending field as it appears in request bodies.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyPhone => "phone",
            Self::UnknownGender { .. } => "gender",
        }
    }

    /// Stable machine-readable reason for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::EmptyName | Self::EmptyEmail | Self::EmptyPhone => {
                "missing_field"
            }
            Self::InvalidId => "invalid_uuid",
            Self::UnknownGender { .. } => "unknown_gender",
        }
    }
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID is required"),
            Self::InvalidId => write!(f, "student id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::UnknownGender { value } => {
                write!(f, "gender must be one of Male, Female or Other (got {value:?})")
            }
        }
    }
}

impl std::error::Error for StudentValidationError {}

/// Stable student identifier stored as a UUID.
///
/// Any textual form `Uuid` accepts is normalised to the lowercase hyphenated
/// form, so equality and hashing follow the UUID rather than its spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(Uuid, String);

impl StudentId {
    /// Validate and construct a [`StudentId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`StudentId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an identifier already issued by the record store.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, StudentValidationError> {
        if id.trim().is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(StudentValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| StudentValidationError::InvalidId)?;
        Ok(Self::from_uuid(parsed))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        let StudentId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Gender recorded for a student. Serialised verbatim as `Male`, `Female` or
/// `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Every gender in form order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Label shown to people filling in the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Prefer not to say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = StudentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| StudentValidationError::UnknownGender {
                value: s.to_owned(),
            })
    }
}

/// Student draft awaiting an identifier from the record store.
///
/// ## Invariants
/// - Drafts built with [`NewStudent::try_new`] have non-empty `name`, `email`
///   and `phone`, stored trimmed. Rows read back from the store are taken as
///   stored, since other writers may have skipped that check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudent {
    name: String,
    email: String,
    phone: String,
    gender: Gender,
}

fn required(
    value: impl Into<String>,
    err: StudentValidationError,
) -> Result<String, StudentValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_owned()
    })
}

impl NewStudent {
    /// Validate and construct a draft.
    ///
    /// # Examples
    /// ```
    /// use student_registry::domain::{Gender, NewStudent, StudentValidationError};
    ///
    /// let draft = NewStudent::try_new("Ann", "a@x.com", "1", Gender::Female).unwrap();
    /// assert_eq!(draft.email(), "a@x.com");
    ///
    /// let err = NewStudent::try_new(" ", "a@x.com", "1", Gender::Female).unwrap_err();
    /// assert_eq!(err, StudentValidationError::EmptyName);
    /// ```
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        gender: Gender,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: required(name, StudentValidationError::EmptyName)?,
            email: required(email, StudentValidationError::EmptyEmail)?,
            phone: required(phone, StudentValidationError::EmptyPhone)?,
            gender,
        })
    }

    /// Rebuild a draft from columns already held by the record store.
    pub fn from_stored(name: String, email: String, phone: String, gender: Gender) -> Self {
        Self {
            name,
            email,
            phone,
            gender,
        }
    }

    /// Student's name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address; unique across the registry.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Phone number as entered.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Recorded gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }
}

/// Registered student.
///
/// ## Invariants
/// - `id` is a valid UUID and never changes once assigned.
/// - The remaining fields follow the [`NewStudent`] invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudentDto", into = "StudentDto")]
pub struct Student {
    id: StudentId,
    details: NewStudent,
}

impl Student {
    /// Attach an identifier to a validated draft.
    pub fn new(id: StudentId, details: NewStudent) -> Self {
        Self { id, details }
    }

    /// Identifier assigned by the record store.
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Mutable fields of the record.
    pub fn details(&self) -> &NewStudent {
        &self.details
    }

    /// Student's name.
    pub fn name(&self) -> &str {
        self.details.name()
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.details.email()
    }

    /// Phone number.
    pub fn phone(&self) -> &str {
        self.details.phone()
    }

    /// Recorded gender.
    pub fn gender(&self) -> Gender {
        self.details.gender()
    }

    /// Split into identifier and mutable fields.
    pub fn into_parts(self) -> (StudentId, NewStudent) {
        (self.id, self.details)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StudentDto {
    id: String,
    name: String,
    email: String,
    phone: String,
    gender: Gender,
}

impl From<Student> for StudentDto {
    fn from(value: Student) -> Self {
        let (id, details) = value.into_parts();
        Self {
            id: id.into(),
            name: details.name,
            email: details.email,
            phone: details.phone,
            gender: details.gender,
        }
    }
}

impl TryFrom<StudentDto> for Student {
    type Error = StudentValidationError;

    fn try_from(value: StudentDto) -> Result<Self, Self::Error> {
        let StudentDto {
            id,
            name,
            email,
            phone,
            gender,
        } = value;
        let id = StudentId::try_from(id)?;
        let details = NewStudent::try_new(name, email, phone, gender)?;
        Ok(Self::new(id, details))
    }
}
