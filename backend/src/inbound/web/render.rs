//! HTML rendering for the registry page.
//!
//! Markup is assembled by hand; every interpolated value passes through
//! [`escape`].

use std::fmt::Write as _;

use url::form_urlencoded;

use super::view_state::{DeleteState, Notice, StudentForm};
use crate::domain::{Gender, Student};

/// Disables a form's buttons once it has been submitted.
const DISABLE_ON_SUBMIT: &str =
    "this.querySelectorAll('button').forEach((button) => { button.disabled = true; })";

/// Everything the page shows for one request.
#[derive(Debug)]
pub struct PageView<'a> {
    /// Rows left after the search filter.
    pub students: Vec<&'a Student>,
    /// Current search text.
    pub search: &'a str,
    pub form: &'a StudentForm,
    pub delete: &'a DeleteState,
    pub notice: Option<Notice>,
    /// Message from a failed submission or fetch.
    pub error: Option<&'a str>,
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Page URL carrying the given query parameters; blank values are dropped.
pub fn page_location(params: &[(&str, &str)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter().filter(|(_, value)| !value.is_empty()) {
        serializer.append_pair(key, value);
    }
    let query = serializer.finish();
    if query.is_empty() {
        "/".to_owned()
    } else {
        format!("/?{query}")
    }
}

/// Render the full page.
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Student Registry</title>\n</head>\n<body>\n<h1>Student Registry</h1>\n",
    );
    if let Some(notice) = view.notice {
        let _ = writeln!(
            html,
            "<p class=\"notice\" role=\"status\">{}</p>",
            notice.message()
        );
    }
    if let Some(error) = view.error {
        let _ = writeln!(html, "<p class=\"error\" role=\"alert\">{}</p>", escape(error));
    }
    render_form(&mut html, view);
    render_search(&mut html, view.search);
    render_table(&mut html, view);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, view: &PageView<'_>) {
    let form = view.form;
    let heading = if form.is_editing() {
        "Edit student"
    } else {
        "Add student"
    };
    let _ = writeln!(html, "<h2>{heading}</h2>");
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/students/form\" onsubmit=\"{DISABLE_ON_SUBMIT}\">"
    );
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"id\" value=\"{}\">",
        escape(&form.id)
    );
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"q\" value=\"{}\">",
        escape(view.search)
    );
    for (name, label, kind, value) in [
        ("name", "Name", "text", &form.name),
        ("email", "Email", "email", &form.email),
        ("phone", "Phone", "tel", &form.phone),
    ] {
        let _ = writeln!(
            html,
            "<label>{label} <input type=\"{kind}\" name=\"{name}\" value=\"{}\" required></label>",
            escape(value)
        );
    }
    html.push_str("<label>Gender <select name=\"gender\">\n");
    for gender in Gender::ALL {
        let selected = if form.gender == gender.as_str() {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            gender.as_str(),
            gender.label()
        );
    }
    html.push_str("</select></label>\n");
    if form.is_editing() {
        html.push_str("<button type=\"submit\">Update</button>\n");
        let cancel = page_location(&[("q", view.search)]);
        let _ = writeln!(html, "<a href=\"{}\">Cancel</a>", escape(&cancel));
    } else {
        html.push_str("<button type=\"submit\">Add</button>\n");
    }
    html.push_str("</form>\n");
}

fn render_search(html: &mut String, search: &str) {
    let _ = writeln!(
        html,
        "<form method=\"get\" action=\"/\" role=\"search\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search\">\
         <button type=\"submit\">Search</button></form>",
        escape(search)
    );
}

fn render_table(html: &mut String, view: &PageView<'_>) {
    if view.students.is_empty() {
        html.push_str("<p class=\"empty\">No students found</p>\n");
        return;
    }
    html.push_str(
        "<table>\n<thead><tr><th>Name</th><th>Email</th><th>Phone</th>\
         <th>Gender</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    let armed = view
        .delete
        .armed_id()
        .map(ToString::to_string)
        .unwrap_or_default();
    for student in &view.students {
        let id = student.id().to_string();
        let edit = page_location(&[("edit", &id), ("q", view.search)]);
        let delete_label = if view.delete.is_armed(student.id()) {
            "Confirm delete"
        } else {
            "Delete"
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>\
             <a href=\"{}\">Edit</a> \
             <form method=\"post\" action=\"/students/{id}/delete\" onsubmit=\"{DISABLE_ON_SUBMIT}\">\
             <input type=\"hidden\" name=\"armed\" value=\"{armed}\">\
             <input type=\"hidden\" name=\"q\" value=\"{}\">\
             <button type=\"submit\">{delete_label}</button></form></td></tr>",
            escape(student.name()),
            escape(student.email()),
            escape(student.phone()),
            student.gender().label(),
            escape(&edit),
            escape(view.search),
        );
    }
    html.push_str("</tbody>\n</table>\n");
}
