use serde::{Deserialize, Serialize};

/// A registered account as stored and returned over the wire.
///
/// The password is plaintext and is echoed back in responses; callers that
/// expose this beyond a trusted network need to hash it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "account_id")]
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Epoch seconds, supplied by the client.
    #[serde(rename = "time_posted_epoch")]
    pub posted_at: i64,
}
