//! In-memory student store.
//!
//! Used when no database is configured and by integration tests. Rows are
//! kept in insertion order, which is also the listing order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{NewStudent, Student, StudentId};

/// Student repository backed by a vector behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    rows: RwLock<Vec<Student>>,
}

impl InMemoryStudentRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `students`.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            rows: RwLock::new(students.into_iter().collect()),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.email() == email)
            .map(|row| row.id().clone()))
    }

    async fn find_by_email_excluding(
        &self,
        email: &str,
        excluding: &StudentId,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.email() == email && row.id() != excluding)
            .map(|row| row.id().clone()))
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError> {
        let created = Student::new(StudentId::random(), student.clone());
        self.rows.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id() == student.id()) else {
            return Ok(None);
        };
        *row = student.clone();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use rstest::{fixture, rstest};

    fn draft(name: &str, email: &str) -> NewStudent {
        NewStudent::try_new(name, email, "07700 900000", Gender::Other).expect("valid draft")
    }

    #[fixture]
    fn repo() -> InMemoryStudentRepository {
        InMemoryStudentRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_ids_and_preserves_order(repo: InMemoryStudentRepository) {
        let ann = repo.insert(&draft("Ann", "a@x.com")).await.expect("insert ann");
        let bob = repo.insert(&draft("Bob", "b@x.com")).await.expect("insert bob");

        assert_ne!(ann.id(), bob.id());
        let listed = repo.list().await.expect("list");
        assert_eq!(listed, vec![ann, bob]);
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookups_honour_exclusion(repo: InMemoryStudentRepository) {
        let ann = repo.insert(&draft("Ann", "a@x.com")).await.expect("insert");

        let found = repo.find_by_email("a@x.com").await.expect("lookup");
        assert_eq!(found.as_ref(), Some(ann.id()));
        let other = repo
            .find_by_email_excluding("a@x.com", ann.id())
            .await
            .expect("lookup");
        assert_eq!(other, None);
        let case_differs = repo.find_by_email("A@X.COM").await.expect("lookup");
        assert_eq!(case_differs, None);
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_fields_or_reports_miss(repo: InMemoryStudentRepository) {
        let ann = repo.insert(&draft("Ann", "a@x.com")).await.expect("insert");
        let renamed = Student::new(ann.id().clone(), draft("Annie", "a@x.com"));

        let updated = repo.update(&renamed).await.expect("update");
        assert_eq!(updated, Some(renamed.clone()));

        let ghost = Student::new(StudentId::random(), draft("Ghost", "g@x.com"));
        assert_eq!(repo.update(&ghost).await.expect("update"), None);
        assert_eq!(repo.list().await.expect("list"), vec![renamed]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_went(repo: InMemoryStudentRepository) {
        let ann = repo.insert(&draft("Ann", "a@x.com")).await.expect("insert");

        assert!(repo.delete(ann.id()).await.expect("delete"));
        assert!(!repo.delete(ann.id()).await.expect("delete again"));
        assert!(repo.list().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn uppercase_ids_address_the_same_row(repo: InMemoryStudentRepository) {
        let ann = repo.insert(&draft("Ann", "a@x.com")).await.expect("insert");
        let shouted = StudentId::new(ann.id().as_ref().to_uppercase()).expect("uppercase id");

        let clash = repo
            .find_by_email_excluding("a@x.com", &shouted)
            .await
            .expect("lookup");
        assert_eq!(clash, None);
        assert!(repo.delete(&shouted).await.expect("delete"));
        assert!(repo.list().await.expect("list").is_empty());
    }
}
