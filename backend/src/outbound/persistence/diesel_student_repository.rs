//! PostgreSQL-backed [`StudentRepository`] using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{NewStudent, Student, StudentId};
use crate::outbound::row_mapping::student_from_columns;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::DbPool;
use super::schema::students;

/// Diesel implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_student(row: StudentRow) -> Student {
    student_from_columns(row.id, row.name, row.email, row.phone, &row.gender)
}

fn new_row<'a>(id: Uuid, student: &'a NewStudent) -> NewStudentRow<'a> {
    NewStudentRow {
        id,
        name: student.name(),
        email: student.email(),
        phone: student.phone(),
        gender: student.gender().as_str(),
    }
}

fn changeset(student: &Student) -> StudentChangeset<'_> {
    StudentChangeset {
        name: student.name(),
        email: student.email(),
        phone: student.phone(),
        gender: student.gender().as_str(),
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_student).collect())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Option<Uuid> = students::table
            .filter(students::email.eq(email))
            .select(students::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(StudentId::from_uuid))
    }

    async fn find_by_email_excluding(
        &self,
        email: &str,
        excluding: &StudentId,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Option<Uuid> = students::table
            .filter(students::email.eq(email))
            .filter(students::id.ne(*excluding.as_uuid()))
            .select(students::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(StudentId::from_uuid))
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: StudentRow = diesel::insert_into(students::table)
            .values(&new_row(Uuid::new_v4(), student))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_student(row))
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> =
            diesel::update(students::table.filter(students::id.eq(*student.id().as_uuid())))
                .set(&changeset(student))
                .returning(StudentRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        Ok(row.map(row_to_student))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(students::table.filter(students::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> StudentRow {
        StudentRow {
            id: Uuid::nil(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            phone: "1".into(),
            gender: "Female".into(),
        }
    }

    #[rstest]
    fn row_converts_to_student(row: StudentRow) {
        let student = row_to_student(row);
        assert_eq!(student.id().as_uuid(), &Uuid::nil());
        assert_eq!(student.gender(), Gender::Female);
        assert_eq!(student.email(), "a@x.com");
    }

    #[rstest]
    fn write_rows_carry_wire_gender() {
        let draft = NewStudent::try_new("Bob", "b@x.com", "2", Gender::Other).expect("draft");
        let insert = new_row(Uuid::nil(), &draft);
        assert_eq!(insert.gender, "Other");

        let student = Student::new(StudentId::from_uuid(Uuid::nil()), draft);
        assert_eq!(changeset(&student).email, "b@x.com");
    }
}
