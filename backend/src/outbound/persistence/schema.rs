//! Diesel table definitions.
//!
//! The table is owned outside this service; the expected shape is
//!
//! ```sql
//! create table students (
//!     id uuid primary key default gen_random_uuid(),
//!     name text not null,
//!     email text not null,
//!     phone text not null,
//!     gender text not null
//! );
//! ```
//!
//! `email` carries no unique constraint; uniqueness is checked before writes.

diesel::table! {
    /// Registered students.
    students (id) {
        /// Primary key.
        id -> Uuid,
        /// Student's name.
        name -> Text,
        /// Email address, unique by convention.
        email -> Text,
        /// Phone number as entered.
        phone -> Text,
        /// One of `Male`, `Female` or `Other`.
        gender -> Text,
    }
}
