//! Server-rendered registry page.
//!
//! One page holds the student form, a search box and the table. Browser-side
//! state (the draft, the row being edited, the armed delete and the search
//! text) is modelled in [`view_state`] and carried between requests in query
//! parameters and hidden fields. Handlers talk to the same driving ports as
//! the JSON API.

pub mod filter;
pub mod pages;
pub mod render;
pub mod view_state;

use actix_web::web;

pub use filter::filter_students;
pub use view_state::{DeleteClick, DeleteState, Notice, StudentForm, Submission};

/// Register the page routes at the application root.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::submit_form)
        .service(pages::delete_click);
}
