pub mod employee_store;
#[cfg(test)]
pub mod memory;

pub use employee_store::*;

use mongodb::{Client, Collection, Database};
use std::error::Error;

const DEFAULT_DATABASE: &str = "employee_service";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Indexes backing the duplicate-check query. They are not unique: the
    /// check stays application-level.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::Document;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let employees = self.collection::<mongodb::bson::Document>(EMPLOYEES_COLLECTION);

        for field in crate::services::duplicate_check::UNIQUE_FIELDS {
            let key = format!("data.{}", field);
            let mut keys = Document::new();
            keys.insert(key.clone(), 1);
            let index = IndexModel::builder().keys(keys).build();

            match employees.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", EMPLOYEES_COLLECTION, key),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
