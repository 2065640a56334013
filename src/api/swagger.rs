use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Service API",
        version = "1.0.0",
        description = "Employee records backend.\n\n**Features:**\n- Employee CRUD with duplicate checks on username, email and contact number\n- Paginated listing\n- Profile photos hosted on Cloudinary\n- Country list for address forms",
        contact(
            name = "Employee Service Team"
        )
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Employees
        crate::api::employees::create_employee,
        crate::api::employees::list_employees,
        crate::api::employees::get_employee,
        crate::api::employees::list_employees_page,
        crate::api::employees::update_employee,
        crate::api::employees::delete_employee,

        // Countries
        crate::api::countries::get_countries,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::CreateEmployeeRequest,
            crate::models::EmployeeResponse,
            crate::models::StoredEmployee,
            crate::models::PaginatedEmployees,
            crate::models::MessageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service and database status."),
        (name = "Employees", description = "Create, read, update and delete employee records."),
        (name = "Countries", description = "Country names proxied from a public list."),
    )
)]
pub struct ApiDoc;
