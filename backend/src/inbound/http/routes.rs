//! Route table for the HTTP adapter.
//!
//! ```text
//! POST /Signup/  POST /Login/  POST /Logout/
//! GET  /AddStudent/  /GetStudent/  /DeleteStudent/
//! GET  /AddFaculty/  /GetFaculty/  /DeleteFaculty/
//! ```
//!
//! Handlers expect [`HttpState`](super::state::HttpState) in app data and a
//! session middleware wrapping the app.

use actix_web::web;

use super::auth::{
    credentials_form_config, credentials_method_not_allowed, logout_method_not_allowed, sign_in,
    sign_out, sign_up,
};
use super::entities::{
    add_faculty, add_student, delete_faculty, delete_student, get_faculty, get_student,
};

/// Register every session-backed endpoint on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use records_backend::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(credentials_form_config())
        .service(
            web::resource("/Signup/")
                .route(web::post().to(sign_up))
                .default_service(web::to(credentials_method_not_allowed)),
        )
        .service(
            web::resource("/Login/")
                .route(web::post().to(sign_in))
                .default_service(web::to(credentials_method_not_allowed)),
        )
        .service(
            web::resource("/Logout/")
                .route(web::post().to(sign_out))
                .default_service(web::to(logout_method_not_allowed)),
        )
        .service(add_student)
        .service(get_student)
        .service(delete_student)
        .service(add_faculty)
        .service(get_faculty)
        .service(delete_faculty);
}
