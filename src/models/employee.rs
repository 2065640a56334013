use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Free-form attribute bag stored under `data`.
pub type EmployeeData = Map<String, Value>;

/// Keys that belong to the document envelope and never live inside the bag.
const RESERVED_KEYS: [&str; 2] = ["id", "_id"];

/// Employee document as stored in the `employees` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub data: EmployeeData,
}

impl Employee {
    pub fn new(data: EmployeeData) -> Self {
        Self { id: None, data }
    }

    /// Overlays `patch` on the stored bag: new fields overwrite, the rest are kept.
    pub fn merged_data(&self, patch: EmployeeData) -> EmployeeData {
        let mut merged = self.data.clone();
        merged.extend(strip_reserved(patch));
        merged
    }

    pub fn photo(&self) -> Option<&str> {
        self.data.get("photo").and_then(Value::as_str)
    }
}

pub fn strip_reserved(mut data: EmployeeData) -> EmployeeData {
    for key in RESERVED_KEYS {
        data.remove(key);
    }
    data
}

/// Body of `POST /api/v1/employees`. Only these fields are persisted.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[schema(value_type = Option<String>)]
    pub first_name: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub last_name: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub username: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub contact_number: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub country: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub account_type: Option<Value>,
    /// Remote URL or data URI handed to the image host. Empty means no photo.
    #[serde(default)]
    pub photo: Option<String>,
}

impl CreateEmployeeRequest {
    /// The photo source to upload, if one was supplied.
    pub fn photo_source(&self) -> Option<&str> {
        self.photo.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// Builds the bag to store, with `photo` replaced by the hosted URL (or `""`).
    pub fn into_data(self, photo_url: String) -> EmployeeData {
        let mut data = EmployeeData::new();
        let fields = [
            ("firstName", self.first_name),
            ("lastName", self.last_name),
            ("username", self.username),
            ("email", self.email),
            ("contactNumber", self.contact_number),
            ("country", self.country),
            ("accountType", self.account_type),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                data.insert(key.to_string(), value);
            }
        }
        data.insert("photo".to_string(), Value::String(photo_url));
        data
    }
}

/// API view of a record: the bag flattened next to its identifier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeResponse {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub data: EmployeeData,
    pub id: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            data: strip_reserved(employee.data),
        }
    }
}

/// The saved document as written: `{ "_id": <hex>, "data": {...} }`.
/// Returned by create and update.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredEmployee {
    #[serde(rename = "_id")]
    pub id: String,
    #[schema(value_type = Object)]
    pub data: EmployeeData,
}

impl From<Employee> for StoredEmployee {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            data: strip_reserved(employee.data),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEmployees {
    pub total_employees: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub employees: Vec<EmployeeResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
