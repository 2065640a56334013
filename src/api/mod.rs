pub mod countries;
pub mod employees;
pub mod health;
pub mod swagger;

use crate::utils::error::AppError;
use actix_web::web;

/// Registers every route. Shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Invalid JSON body: {}", err)).into()
    }))
    // Health check
    .route("/health", web::get().to(health::health_check))
    // Employees: CRUD + pagination
    .service(
        web::scope("/api/v1/employees")
            .route("", web::post().to(employees::create_employee))
            .route("", web::get().to(employees::list_employees))
            .route("/{id}", web::get().to(employees::get_employee))
            .route("/{id}", web::put().to(employees::update_employee))
            .route("/{id}", web::delete().to(employees::delete_employee))
            .route("/{current_page}/{limit}", web::get().to(employees::list_employees_page)),
    )
    // Countries: proxied public list
    .service(
        web::scope("/api/v1/countries")
            .route("", web::get().to(countries::get_countries)),
    );
}
