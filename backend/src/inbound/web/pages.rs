//! Handlers for the server-rendered registry page.
//!
//! ```text
//! GET  /                       ?q=&edit=&confirm=&notice=
//! POST /students/form          id,name,email,phone,gender,q
//! POST /students/{id}/delete   armed,q
//! ```
//!
//! Successful actions answer `303 See Other` back to `/` so a refresh never
//! repeats them. Failures re-render the page with the draft kept and the
//! error's status code.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError, get, post, web};
use serde::Deserialize;
use tracing::warn;

use super::filter::filter_students;
use super::render::{PageView, page_location, render_page};
use super::view_state::{DeleteClick, DeleteState, Notice, StudentForm, Submission};
use crate::domain::{Error, Student, StudentId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_student_id;

/// Query parameters of `GET /`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    /// Search text.
    pub q: String,
    /// Row to load into the form.
    pub edit: Option<String>,
    /// Row whose delete button is armed.
    pub confirm: Option<String>,
    pub notice: Option<String>,
}

/// Body of `POST /students/form`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub q: String,
}

impl FormSubmission {
    fn into_parts(self) -> (StudentForm, String) {
        let Self {
            id,
            name,
            email,
            phone,
            gender,
            q,
        } = self;
        (
            StudentForm {
                id,
                name,
                email,
                phone,
                gender,
            },
            q,
        )
    }
}

/// Body of `POST /students/{id}/delete`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteSubmission {
    /// Row armed when the page was rendered.
    pub armed: String,
    pub q: String,
}

struct PageRequest<'a> {
    search: &'a str,
    form: StudentForm,
    delete: DeleteState,
    notice: Option<Notice>,
}

impl<'a> PageRequest<'a> {
    fn idle(search: &'a str) -> Self {
        Self {
            search,
            form: StudentForm::blank(),
            delete: DeleteState::Idle,
            notice: None,
        }
    }
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html_response(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type(ContentType::html()).body(body)
}

fn render(students: &[Student], request: &PageRequest<'_>, error: Option<&str>) -> String {
    render_page(&PageView {
        students: filter_students(students, request.search),
        search: request.search,
        form: &request.form,
        delete: &request.delete,
        notice: request.notice,
        error,
    })
}

/// Re-render after a failed action. If the list cannot be fetched either,
/// the table is shown empty and the original error is kept.
async fn render_failure(state: &HttpState, request: PageRequest<'_>, error: &Error) -> HttpResponse {
    let students = state
        .students_query
        .list_students()
        .await
        .unwrap_or_else(|list_error| {
            warn!(error = %list_error, "could not list students while rendering a failure");
            Vec::new()
        });
    let body = render(&students, &request, Some(error.message()));
    html_response(HttpResponse::build(error.status_code()), body)
}

/// The registry page: form, search box and table.
#[get("/")]
pub async fn index(state: web::Data<HttpState>, query: web::Query<PageQuery>) -> HttpResponse {
    let query = query.into_inner();
    let students = match state.students_query.list_students().await {
        Ok(students) => students,
        Err(error) => {
            warn!(error = %error, "could not list students for the page");
            let body = render(&[], &PageRequest::idle(&query.q), Some(error.message()));
            return html_response(HttpResponse::build(error.status_code()), body);
        }
    };

    let edit_target = query
        .edit
        .as_deref()
        .and_then(|raw| StudentId::new(raw.trim()).ok());
    let form = edit_target
        .and_then(|id| students.iter().find(|student| *student.id() == id))
        .map_or_else(StudentForm::blank, StudentForm::editing);
    let request = PageRequest {
        search: &query.q,
        form,
        delete: DeleteState::from_param(query.confirm.as_deref()),
        notice: query.notice.as_deref().and_then(|raw| raw.parse().ok()),
    };
    html_response(HttpResponse::Ok(), render(&students, &request, None))
}

/// Create or update depending on whether the form carries an edit target.
#[post("/students/form")]
pub async fn submit_form(
    state: web::Data<HttpState>,
    body: web::Form<FormSubmission>,
) -> HttpResponse {
    let (form, search) = body.into_inner().into_parts();
    let outcome = match form.submission() {
        Ok(submission) => {
            let notice = submission.notice();
            let result = match submission {
                Submission::Create(draft) => state.students.create_student(draft).await,
                Submission::Update(student) => state.students.update_student(student).await,
            };
            result.map(|_| notice)
        }
        Err(error) => Err(error),
    };
    match outcome {
        Ok(notice) => see_other(page_location(&[
            ("notice", notice.as_param()),
            ("q", &search),
        ])),
        Err(error) => {
            let request = PageRequest {
                form,
                ..PageRequest::idle(&search)
            };
            render_failure(&state, request, &error).await
        }
    }
}

/// First click arms the row; a second click on the same row deletes it.
#[post("/students/{id}/delete")]
pub async fn delete_click(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Form<DeleteSubmission>,
) -> HttpResponse {
    let DeleteSubmission { armed, q } = body.into_inner();
    let id = match parse_student_id(Some(path.as_str())) {
        Ok(id) => id,
        Err(error) => return render_failure(&state, PageRequest::idle(&q), &error).await,
    };
    match DeleteState::from_param(Some(&armed)).click(id) {
        DeleteClick::Armed(id) => {
            let id = id.to_string();
            see_other(page_location(&[("confirm", &id), ("q", &q)]))
        }
        DeleteClick::Confirmed(id) => match state.students.delete_student(&id).await {
            Ok(()) => see_other(page_location(&[
                ("notice", Notice::Deleted.as_param()),
                ("q", &q),
            ])),
            Err(error) => render_failure(&state, PageRequest::idle(&q), &error).await,
        },
    }
}
