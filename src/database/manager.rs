use mongodb::{
    bson::{doc, Document},
    error::ErrorKind,
    Client, Database,
};
use thiserror::Error;
use tracing::info;

use super::repository::Repository;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid object id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

impl DatabaseError {
    /// True when the driver could not reach a suitable server at all
    pub fn is_connectivity(&self) -> bool {
        match self {
            DatabaseError::Mongo(e) => matches!(e.kind.as_ref(), ErrorKind::ServerSelection { .. }),
            _ => false,
        }
    }
}

/// Handle over the ChefLink database.
///
/// Wraps one long-lived `mongodb::Client`; the driver pools connections
/// internally, so clones are cheap and safe to share across handlers.
#[derive(Clone, Debug)]
pub struct Store {
    db: Database,
}

impl Store {
    pub const USERS: &'static str = "users";
    pub const PURCHASES: &'static str = "Purchased_Foods";
    pub const FOOD_ITEMS: &'static str = "All_Food_Items";
    pub const FEEDBACK: &'static str = "usersFeedback";

    /// Build the client from a connection string. No I/O happens for plain
    /// `mongodb://` URIs until the first operation.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(uri).await?;
        info!("MongoDB client created for database: {}", database_name);
        Ok(Self::from_client(&client, database_name))
    }

    pub fn from_client(client: &Client, database_name: &str) -> Self {
        Self {
            db: client.database(database_name),
        }
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }

    pub fn users(&self) -> Repository {
        self.repository(Self::USERS)
    }

    pub fn purchases(&self) -> Repository {
        self.repository(Self::PURCHASES)
    }

    pub fn food_items(&self) -> Repository {
        self.repository(Self::FOOD_ITEMS)
    }

    pub fn feedback(&self) -> Repository {
        self.repository(Self::FEEDBACK)
    }

    fn repository(&self, collection: &str) -> Repository {
        Repository::new(self.db.collection::<Document>(collection))
    }

    /// Pings the deployment to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
