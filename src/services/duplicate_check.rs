use crate::models::{Employee, EmployeeData};
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use serde_json::Value;

/// Fields that must not repeat across records, in probe order.
pub const UNIQUE_FIELDS: [&str; 3] = ["username", "email", "contactNumber"];

/// The unique-field values of one candidate bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateProbe {
    values: Vec<(&'static str, Value)>,
}

impl DuplicateProbe {
    /// Null, missing and empty-string values are left out of the probe.
    pub fn from_data(data: &EmployeeData) -> Self {
        let values = UNIQUE_FIELDS
            .iter()
            .filter_map(|&field| match data.get(field) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.trim().is_empty() => None,
                Some(value) => Some((field, value.clone())),
            })
            .collect();
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the probed fields, in probe order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(field, _)| *field)
    }

    #[cfg(test)]
    pub fn values(&self) -> &[(&'static str, Value)] {
        &self.values
    }

    /// `{ $or: [{data.<field>: value}, ...], _id: { $ne: exclude } }`, or `None`
    /// when there is nothing to probe.
    pub fn to_filter(&self, exclude: Option<ObjectId>) -> Result<Option<Document>, bson::ser::Error> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut clauses = Vec::with_capacity(self.values.len());
        for (field, value) in &self.values {
            let mut clause = Document::new();
            clause.insert(format!("data.{}", field), bson::to_bson(value)?);
            clauses.push(Bson::Document(clause));
        }

        let mut filter = doc! { "$or": clauses };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": id });
        }
        Ok(Some(filter))
    }

    /// Whether `employee` shares at least one probed value.
    #[cfg(test)]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.values
            .iter()
            .any(|(field, value)| same_value(employee.data.get(*field), value))
    }

    /// Probed fields that at least one of `existing` already holds.
    pub fn conflicting_fields(&self, existing: &[Employee]) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(field, value)| {
                existing
                    .iter()
                    .any(|employee| same_value(employee.data.get(*field), value))
            })
            .map(|(field, _)| *field)
            .collect()
    }
}

// Mirrors the database's equality match: numbers compare by value, and a
// stored array matches when any element does.
fn same_value(stored: Option<&Value>, probe: &Value) -> bool {
    match stored {
        Some(Value::Array(items)) if !probe.is_array() => {
            items.iter().any(|item| scalar_eq(item, probe))
        }
        Some(stored) => scalar_eq(stored, probe),
        None => false,
    }
}

fn scalar_eq(stored: &Value, probe: &Value) -> bool {
    match (stored, probe) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => stored == probe,
    }
}
