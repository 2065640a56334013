use crate::{
    database::EmployeeStore,
    models::{Employee, EmployeeData},
    services::duplicate_check::DuplicateProbe,
    utils::error::AppError,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

/// Vec-backed store for handler and service tests.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    records: Mutex<Vec<Employee>>,
    fail: bool,
    match_all: bool,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like a lost connection.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// A store whose conflict query returns every other record, whatever
    /// the probe holds.
    pub fn matching_everything() -> Self {
        Self {
            match_all: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Employee> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Database("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn insert(&self, data: EmployeeData) -> Result<Employee, AppError> {
        self.check()?;
        let employee = Employee {
            id: Some(ObjectId::new()),
            data,
        };
        self.records.lock().unwrap().push(employee.clone());
        Ok(employee)
    }

    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Employee>, AppError> {
        self.check()?;
        if i64::try_from(skip).is_err() {
            return Err(AppError::Database(format!("cannot serialize u64 {} as i64", skip)));
        }
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.snapshot().into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.check()?;
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(id))
            .cloned())
    }

    async fn replace_data(&self, id: ObjectId, data: EmployeeData) -> Result<Option<Employee>, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        Ok(records.iter_mut().find(|e| e.id == Some(id)).map(|e| {
            e.data = data;
            e.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|e| e.id != Some(id));
        Ok(records.len() < before)
    }

    async fn find_conflicts(
        &self,
        probe: &DuplicateProbe,
        exclude: Option<ObjectId>,
    ) -> Result<Vec<Employee>, AppError> {
        self.check()?;
        if probe.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|e| exclude.is_none() || e.id != exclude)
            .filter(|e| self.match_all || probe.matches(e))
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}
