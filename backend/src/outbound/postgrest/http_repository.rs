//! Reqwest-backed [`StudentRepository`] talking to a PostgREST endpoint.
//!
//! Filters use PostgREST's `eq.`/`neq.` operators and writes ask for the
//! affected rows with `Prefer: return=representation`, mirroring how a hosted
//! database's REST interface is normally queried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use super::dto::{IdRowDto, PostgrestErrorDto, STUDENT_COLUMNS, StudentRowDto, StudentWriteDto};
use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{NewStudent, Student, StudentId};

const TABLE: &str = "students";
const PREFER_REPRESENTATION: &str = "return=representation";

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum PostgrestSetupError {
    /// The base URL cannot have path segments appended.
    #[error("PostgREST URL cannot be used as a base: {url}")]
    InvalidBaseUrl {
        /// Offending URL.
        url: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build PostgREST client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Student repository backed by PostgREST.
pub struct PostgrestStudentRepository {
    client: Client,
    endpoint: Url,
    api_key: Option<Zeroizing<String>>,
}

impl PostgrestStudentRepository {
    /// Build an adapter for the PostgREST root at `base_url`
    /// (for a hosted project, `https://<project>/rest/v1`).
    ///
    /// When `api_key` is set it is sent as both the `apikey` header and a
    /// bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be extended with the table name
    /// or the HTTP client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PostgrestSetupError> {
        let endpoint = table_endpoint(&base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.map(Zeroizing::new),
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => builder
                .header("apikey", key.as_str())
                .bearer_auth(key.as_str()),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, StudentPersistenceError> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_rows(body.as_ref())
    }

    async fn find_id(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let rows: Vec<IdRowDto> = self
            .fetch(
                self.client
                    .get(self.endpoint.clone())
                    .query(&[("select", "id"), ("limit", "1")])
                    .query(filters),
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| StudentId::from_uuid(row.id)))
    }
}

fn table_endpoint(base_url: &Url) -> Result<Url, PostgrestSetupError> {
    let mut endpoint = base_url.clone();
    endpoint
        .path_segments_mut()
        .map_err(|()| PostgrestSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?
        .pop_if_empty()
        .push(TABLE);
    Ok(endpoint)
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn neq(value: impl std::fmt::Display) -> String {
    format!("neq.{value}")
}

#[async_trait]
impl StudentRepository for PostgrestStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        let rows: Vec<StudentRowDto> = self
            .fetch(
                self.client
                    .get(self.endpoint.clone())
                    .query(&[("select", STUDENT_COLUMNS)]),
            )
            .await?;
        Ok(rows.into_iter().map(StudentRowDto::into_domain).collect())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        self.find_id(&[("email", eq(email))]).await
    }

    async fn find_by_email_excluding(
        &self,
        email: &str,
        excluding: &StudentId,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        self.find_id(&[("email", eq(email)), ("id", neq(excluding))])
            .await
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError> {
        let rows: Vec<StudentRowDto> = self
            .fetch(
                self.client
                    .post(self.endpoint.clone())
                    .query(&[("select", STUDENT_COLUMNS)])
                    .header("Prefer", PREFER_REPRESENTATION)
                    .json(&[StudentWriteDto::from(student)]),
            )
            .await?;
        rows.into_iter()
            .next()
            .map(StudentRowDto::into_domain)
            .ok_or_else(|| StudentPersistenceError::query("insert returned no rows"))
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError> {
        let rows: Vec<StudentRowDto> = self
            .fetch(
                self.client
                    .patch(self.endpoint.clone())
                    .query(&[("select", STUDENT_COLUMNS)])
                    .query(&[("id", eq(student.id()))])
                    .header("Prefer", PREFER_REPRESENTATION)
                    .json(&StudentWriteDto::from(student.details())),
            )
            .await?;
        Ok(rows.into_iter().next().map(StudentRowDto::into_domain))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentPersistenceError> {
        let rows: Vec<IdRowDto> = self
            .fetch(
                self.client
                    .delete(self.endpoint.clone())
                    .query(&[("select", "id")])
                    .query(&[("id", eq(id))])
                    .header("Prefer", PREFER_REPRESENTATION),
            )
            .await?;
        Ok(!rows.is_empty())
    }
}

fn decode_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, StudentPersistenceError> {
    serde_json::from_slice(body).map_err(|error| {
        debug!(%error, "PostgREST payload did not decode");
        StudentPersistenceError::query(format!("invalid PostgREST payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> StudentPersistenceError {
    debug!(%error, "PostgREST request failed");
    if error.is_timeout() {
        StudentPersistenceError::connection("record store request timed out")
    } else {
        StudentPersistenceError::connection("record store unreachable")
    }
}

/// Surface PostgREST's own error message when the body carries one.
fn map_status_error(status: StatusCode, body: &[u8]) -> StudentPersistenceError {
    let reported = serde_json::from_slice::<PostgrestErrorDto>(body)
        .ok()
        .and_then(|dto| {
            debug!(status = status.as_u16(), code = ?dto.code, "PostgREST rejected request");
            dto.message
        })
        .filter(|message| !message.trim().is_empty());
    let message = reported.unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {preview}", status.as_u16())
        }
    });

    match status {
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => StudentPersistenceError::connection(message),
        _ => StudentPersistenceError::query(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
