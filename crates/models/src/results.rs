use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult};
use serde::Serialize;

/// Insert acknowledgement, shaped like the driver's raw result with
/// the new id rendered as its hex string.
#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertResponse {
    fn from(res: InsertOneResult) -> Self {
        let inserted_id = match res.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Self { acknowledged: true, inserted_id }
    }
}

/// Delete acknowledgement; `deleted_count` is zero when nothing
/// matched, which is not an error.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(res: DeleteResult) -> Self {
        Self { acknowledged: true, deleted_count: res.deleted_count }
    }
}
