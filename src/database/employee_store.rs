use crate::{
    database::MongoDB,
    models::{Employee, EmployeeData},
    services::duplicate_check::DuplicateProbe,
    utils::error::AppError,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

pub const EMPLOYEES_COLLECTION: &str = "employees";

/// Persistence operations the HTTP layer needs. Listings come back in
/// insertion order.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, data: EmployeeData) -> Result<Employee, AppError>;

    async fn find_all(&self) -> Result<Vec<Employee>, AppError>;

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Employee>, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError>;

    /// Replaces the whole bag. `None` when no record has that id.
    async fn replace_data(&self, id: ObjectId, data: EmployeeData) -> Result<Option<Employee>, AppError>;

    /// `false` when no record has that id.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// Records sharing any probed value, other than `exclude`.
    async fn find_conflicts(
        &self,
        probe: &DuplicateProbe,
        exclude: Option<ObjectId>,
    ) -> Result<Vec<Employee>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoEmployeeStore {
    db: MongoDB,
    collection: Collection<Employee>,
}

impl MongoEmployeeStore {
    pub fn new(db: MongoDB) -> Self {
        let collection = db.collection::<Employee>(EMPLOYEES_COLLECTION);
        Self { db, collection }
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn insert(&self, data: EmployeeData) -> Result<Employee, AppError> {
        let mut employee = Employee::new(data);
        let result = self.collection.insert_one(&employee).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Database("Inserted document has no ObjectId".into()))?;
        employee.id = Some(id);

        Ok(employee)
    }

    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Employee>, AppError> {
        // The driver sends skip as i64; anything larger is past every record.
        if i64::try_from(skip).is_err() {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit)
            .map_err(|_| AppError::InvalidRequest("limit is too large".into()))?;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn replace_data(&self, id: ObjectId, data: EmployeeData) -> Result<Option<Employee>, AppError> {
        let employee = Employee { id: Some(id), data };
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &employee)
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(employee))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_conflicts(
        &self,
        probe: &DuplicateProbe,
        exclude: Option<ObjectId>,
    ) -> Result<Vec<Employee>, AppError> {
        let filter = match probe.to_filter(exclude)? {
            Some(filter) => filter,
            None => return Ok(Vec::new()),
        };

        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}
