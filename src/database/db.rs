use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};

use crate::config::AppConfig;
use crate::database::repository::RepoError;

/// Connects to MongoDB and pings the server so a bad URI fails at startup
/// rather than on the first request.
pub async fn connect_to_mongo(config: &AppConfig) -> Result<Database, RepoError> {
    let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
    client_options.app_name = Some(config.site_name.clone());

    let client = Client::with_options(client_options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    log::info!("Connected successfully to MongoDB");

    Ok(client.database(&config.mongodb_db))
}
