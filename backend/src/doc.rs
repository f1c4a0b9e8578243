//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the student endpoints and health probes together with
//! the schema wrappers from [`crate::inbound::http::schemas`], keeping domain
//! types free of utoipa derives. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, GenderSchema, StudentSchema};
use crate::inbound::http::students::{
    CreateStudentRequest, DeleteStudentResponse, UpdateStudentRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student registry API",
        description = "CRUD interface for student records and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        StudentSchema,
        GenderSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateStudentRequest,
        UpdateStudentRequest,
        DeleteStudentResponse
    )),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "error")]
    #[case("Error", "traceId")]
    #[case("Student", "id")]
    #[case("Student", "gender")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas
            .get(schema)
            .unwrap_or_else(|| panic!("{schema} schema registered"));
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    fn student_and_health_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/api/students", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "{path} documented");
        }
        let students = doc.paths.paths.get("/api/students").expect("students path");
        assert!(students.get.is_some());
        assert!(students.post.is_some());
        assert!(students.put.is_some());
        assert!(students.delete.is_some());
    }
}
