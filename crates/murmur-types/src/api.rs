use serde::Deserialize;

// Request bodies are lenient: clients often echo back whole entities, so
// unknown fields (account_id, message_id) are ignored and missing strings
// become empty, which the validation rules then reject.

// -- Accounts --

/// Body of both `POST /register` and `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// -- Messages --

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub posted_by: i64,
    #[serde(default)]
    pub message_text: String,
    #[serde(default, rename = "time_posted_epoch")]
    pub posted_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub message_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_ignore_client_supplied_id() {
        let creds: Credentials =
            serde_json::from_str(r#"{"account_id": 99, "username": "bob", "password": "pass"}"#)
                .unwrap();
        assert_eq!(creds.username, "bob");
        assert_eq!(creds.password, "pass");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: CreateMessageRequest = serde_json::from_str(r#"{"posted_by": 4}"#).unwrap();
        assert_eq!(req.posted_by, 4);
        assert!(req.message_text.is_empty());
        assert_eq!(req.posted_at, 0);

        let update: UpdateMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(update.message_text.is_empty());
    }

    #[test]
    fn create_message_reads_epoch_field() {
        let req: CreateMessageRequest = serde_json::from_str(
            r#"{"posted_by": 1, "message_text": "hi", "time_posted_epoch": 1669947792}"#,
        )
        .unwrap();
        assert_eq!(req.posted_at, 1669947792);
    }
}
