use mongodb::bson::Document;
use mongodb::{Client, Collection};
use tracing::info;

/// Handles to the two collections the API serves. The underlying
/// client is safe to share across concurrent requests, so the whole
/// struct is cheap to clone into the router state.
#[derive(Clone)]
pub struct Store {
    pub services: Collection<Document>,
    pub orders: Collection<Document>,
}

/// Build the Mongo client and collection handles. Documents carry no
/// enforced schema, so both collections are typed as raw BSON
/// documents. The driver connects lazily; connectivity problems
/// surface on the first operation, not here.
pub async fn connect(cfg: &configs::DatabaseConfig) -> anyhow::Result<Store> {
    let client = Client::with_uri_str(&cfg.uri).await?;
    let db = client.database(&cfg.name);
    info!(database = %cfg.name, "document store handles created");
    Ok(Store {
        services: db.collection("services"),
        orders: db.collection("order"),
    })
}
