//! Student registry REST handlers.
//!
//! ```text
//! GET    /api/students
//! POST   /api/students        {"name","email","phone","gender"}
//! PUT    /api/students        {"id","name","email","phone","gender"}
//! DELETE /api/students?id=<uuid>
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::NO_STUDENT_ROW_MATCHED;
use crate::domain::{Error, Student};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_lookup_id, parse_new_student};

/// Message returned after a delete, whether or not a row matched.
pub const STUDENT_DELETED: &str = "Student deleted successfully";

/// Body for `POST /api/students`.
///
/// Missing fields deserialise as empty strings so they fail presence
/// validation with a field-specific message rather than a parse error.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "07700 900123")]
    pub phone: String,
    #[serde(default)]
    #[schema(example = "Female")]
    pub gender: String,
}

/// Body for `PUT /api/students`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateStudentRequest {
    #[serde(default)]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
}

/// Query string for `DELETE /api/students`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteStudentQuery {
    /// Identifier of the student to delete.
    pub id: Option<String>,
}

/// Confirmation body for deletes.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DeleteStudentResponse {
    #[schema(example = "Student deleted successfully")]
    pub message: String,
}

/// List every registered student.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use student_registry::inbound::http::students::list_students;
///
/// let app = App::new().service(web::scope("/api").service(list_students));
/// ```
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = [StudentSchema]),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students_query.list_students().await?;
    Ok(web::Json(students))
}

/// Register a student; the email must not already be in use.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentSchema),
        (status = 400, description = "Blank field, unknown gender or email already exists", body = ErrorSchema),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let CreateStudentRequest {
        name,
        email,
        phone,
        gender,
    } = payload.into_inner();
    let draft = parse_new_student(&name, &email, &phone, &gender)?;
    let created = state.students.create_student(draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace every field of a student except its id.
#[utoipa::path(
    put,
    path = "/api/students",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentSchema),
        (status = 400, description = "Missing id, blank field or email held by another student", body = ErrorSchema),
        (status = 500, description = "Record store failure or no student with this id", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students")]
pub async fn update_student(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<web::Json<Student>> {
    let UpdateStudentRequest {
        id,
        name,
        email,
        phone,
        gender,
    } = payload.into_inner();
    let id = parse_lookup_id(id.as_deref())?;
    let details = parse_new_student(&name, &email, &phone, &gender)?;
    let Some(id) = id else {
        debug!("update id is not a UUID and matches no student");
        return Err(Error::internal(NO_STUDENT_ROW_MATCHED));
    };
    let updated = state
        .students
        .update_student(Student::new(id, details))
        .await?;
    Ok(web::Json(updated))
}

/// Delete a student by id. Unknown or malformed ids still report success.
#[utoipa::path(
    delete,
    path = "/api/students",
    params(DeleteStudentQuery),
    responses(
        (status = 200, description = "Delete handled", body = DeleteStudentResponse),
        (status = 400, description = "Missing id", body = ErrorSchema),
        (status = 500, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    query: web::Query<DeleteStudentQuery>,
) -> ApiResult<web::Json<DeleteStudentResponse>> {
    match parse_lookup_id(query.id.as_deref())? {
        Some(id) => state.students.delete_student(&id).await?,
        None => debug!("delete id is not a UUID and matches no student"),
    }
    Ok(web::Json(DeleteStudentResponse {
        message: STUDENT_DELETED.to_owned(),
    }))
}

/// Register the handlers on an `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .service(list_students)
            .service(create_student)
            .service(update_student)
            .service(delete_student),
    );
}

#[cfg(test)]
mod tests;
