use crate::{
    database::EmployeeStore,
    models::{
        CreateEmployeeRequest, EmployeeData, EmployeeResponse, MessageResponse, PaginatedEmployees,
        StoredEmployee,
    },
    services::{cloudinary_service::ImageHost, employee_service},
    utils::{error::AppError, pagination::PageRequest},
};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Saved employee document", body = StoredEmployee),
        (status = 400, description = "Username, email or contact number already in use"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    images: web::Data<dyn ImageHost>,
    body: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /employees");

    let created =
        employee_service::create_employee(store.get_ref(), images.get_ref(), body.into_inner()).await?;

    log::info!("✅ Employee created: {}", created.id);
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees", body = [EmployeeResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_employees(store: web::Data<dyn EmployeeStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /employees");

    let employees = employee_service::list_employees(store.get_ref()).await?;

    log::info!("✅ Retrieved {} employees", employees.len());
    Ok(HttpResponse::Ok().json(employees))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ObjectId")),
    responses(
        (status = 200, description = "Employee", body = EmployeeResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = employee_service::parse_id(&path)?;
    log::info!("🔎 GET /employees/{}", id);

    let employee = employee_service::get_employee(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{current_page}/{limit}",
    tag = "Employees",
    params(
        ("current_page" = u64, Path, description = "1-based page number"),
        ("limit" = u64, Path, description = "Employees per page")
    ),
    responses(
        (status = 200, description = "One page of employees", body = PaginatedEmployees),
        (status = 400, description = "Page or limit is not a positive integer"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_employees_page(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (current_page, limit) = path.into_inner();
    let page = PageRequest::parse(&current_page, &limit)?;
    log::info!("📋 GET /employees/{}/{}", page.current_page, page.limit);

    let result = employee_service::list_employees_page(store.get_ref(), page).await?;

    log::info!(
        "✅ Page {}/{} with {} employees",
        result.current_page,
        result.total_pages,
        result.employees.len()
    );
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ObjectId")),
    request_body(content = Object, description = "Fields to merge into the stored record", content_type = "application/json"),
    responses(
        (status = 200, description = "Saved employee document", body = StoredEmployee),
        (status = 400, description = "Malformed id or duplicate unique field"),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    images: web::Data<dyn ImageHost>,
    path: web::Path<String>,
    body: web::Json<EmployeeData>,
) -> Result<HttpResponse, AppError> {
    let id = employee_service::parse_id(&path)?;
    log::info!("✏️  PUT /employees/{}", id);

    let updated =
        employee_service::update_employee(store.get_ref(), images.get_ref(), id, body.into_inner())
            .await?;

    log::info!("✅ Employee updated: {}", updated.id);
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ObjectId")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = employee_service::parse_id(&path)?;
    log::info!("🗑️  DELETE /employees/{}", id);

    employee_service::delete_employee(store.get_ref(), id).await?;

    log::info!("✅ Employee deleted: {}", id);
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}
