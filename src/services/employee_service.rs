use crate::{
    database::EmployeeStore,
    models::{
        CreateEmployeeRequest, EmployeeData, EmployeeResponse, PaginatedEmployees, StoredEmployee,
    },
    services::{cloudinary_service::ImageHost, duplicate_check::DuplicateProbe},
    utils::{error::AppError, pagination::PageRequest},
};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";

pub fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidRequest("Invalid employee ID".into()))
}

/// Fails with `Duplicate` when another record already holds one of the
/// unique values in `data`. Not atomic with the write that follows.
pub async fn ensure_unique(
    store: &dyn EmployeeStore,
    data: &EmployeeData,
    exclude: Option<ObjectId>,
) -> Result<(), AppError> {
    let probe = DuplicateProbe::from_data(data);
    if probe.is_empty() {
        return Ok(());
    }

    let existing = store.find_conflicts(&probe, exclude).await?;
    if existing.is_empty() {
        return Ok(());
    }

    // Any record the store matched is a conflict, even if the local
    // comparison can't say which field it shares.
    let mut fields = probe.conflicting_fields(&existing);
    if fields.is_empty() {
        fields = probe.fields().collect();
    }

    log::warn!("⚠️  Duplicate employee fields: {}", fields.join(", "));
    Err(AppError::Duplicate(fields))
}

async fn upload_photo(images: &dyn ImageHost, source: &str) -> Result<String, AppError> {
    let uploaded = images.upload(source, None).await?;
    log::debug!("📷 Stored photo {} at {}", uploaded.public_id, uploaded.secure_url);
    Ok(uploaded.secure_url)
}

pub async fn create_employee(
    store: &dyn EmployeeStore,
    images: &dyn ImageHost,
    request: CreateEmployeeRequest,
) -> Result<StoredEmployee, AppError> {
    let photo_source = request.photo_source().map(str::to_string);
    let mut data = request.into_data(String::new());

    // Probe before uploading so a rejected request leaves no orphaned image.
    ensure_unique(store, &data, None).await?;

    if let Some(source) = photo_source {
        let url = upload_photo(images, &source).await?;
        data.insert("photo".to_string(), Value::String(url));
    }

    let created = store.insert(data).await?;
    Ok(StoredEmployee::from(created))
}

pub async fn list_employees(store: &dyn EmployeeStore) -> Result<Vec<EmployeeResponse>, AppError> {
    let employees = store.find_all().await?;
    Ok(employees.into_iter().map(EmployeeResponse::from).collect())
}

pub async fn get_employee(store: &dyn EmployeeStore, id: ObjectId) -> Result<EmployeeResponse, AppError> {
    store
        .find_by_id(id)
        .await?
        .map(EmployeeResponse::from)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.into()))
}

pub async fn list_employees_page(
    store: &dyn EmployeeStore,
    page: PageRequest,
) -> Result<PaginatedEmployees, AppError> {
    let total_employees = store.count().await?;
    let employees = if page.skip() >= total_employees {
        Vec::new()
    } else {
        store.find_page(page.skip(), page.limit).await?
    };

    Ok(PaginatedEmployees {
        total_employees,
        total_pages: page.total_pages(total_employees),
        current_page: page.current_page,
        employees: employees.into_iter().map(EmployeeResponse::from).collect(),
    })
}

/// Merges `patch` over the stored bag. A changed, non-empty `photo` is
/// uploaded and replaced by its hosted URL.
pub async fn update_employee(
    store: &dyn EmployeeStore,
    images: &dyn ImageHost,
    id: ObjectId,
    patch: EmployeeData,
) -> Result<StoredEmployee, AppError> {
    let existing = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.into()))?;

    let mut merged = existing.merged_data(patch);
    ensure_unique(store, &merged, Some(id)).await?;

    let new_photo = merged
        .get("photo")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty() && Some(*p) != existing.photo())
        .map(str::to_string);
    if let Some(source) = new_photo {
        let url = upload_photo(images, &source).await?;
        merged.insert("photo".to_string(), Value::String(url));
    }

    let updated = store
        .replace_data(id, merged)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.into()))?;

    Ok(StoredEmployee::from(updated))
}

pub async fn delete_employee(store: &dyn EmployeeStore, id: ObjectId) -> Result<(), AppError> {
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(NOT_FOUND_MESSAGE.into()))
    }
}
