use std::sync::Arc;

use tracing::info;

use murmur_db::Store;
use murmur_types::api::{CreateMessageRequest, Credentials};
use murmur_types::models::{Account, Message};

use crate::error::{ServiceError, ServiceResult, ValidationError};
use crate::validation::{check_message_text, check_new_account};

/// Business rules for accounts and messages. Every method is synchronous and
/// makes one or more blocking store calls; async callers should run it on the
/// blocking pool.
#[derive(Clone)]
pub struct SocialService {
    store: Arc<dyn Store>,
}

impl SocialService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // -- Accounts --

    pub fn register(&self, creds: &Credentials) -> ServiceResult<Account> {
        check_new_account(&creds.username, &creds.password)?;

        if self
            .store
            .get_account_by_username(&creds.username)?
            .is_some()
        {
            return Err(ValidationError::UsernameTaken.into());
        }

        // A concurrent registration can still win between the check and the
        // insert; the UNIQUE constraint then fails the insert as a store error.
        let account: Account = self
            .store
            .create_account(&creds.username, &creds.password)?
            .into();

        info!("Registered account {} ({})", account.id, account.username);
        Ok(account)
    }

    /// Plaintext, case-sensitive comparison.
    pub fn login(&self, creds: &Credentials) -> ServiceResult<Account> {
        match self.store.get_account_by_username(&creds.username)? {
            Some(row) if row.password == creds.password => Ok(row.into()),
            _ => Err(ServiceError::Unauthorized),
        }
    }

    // -- Messages --

    pub fn create_message(&self, req: &CreateMessageRequest) -> ServiceResult<Message> {
        check_message_text(&req.message_text)?;

        if self.store.get_account_by_id(req.posted_by)?.is_none() {
            return Err(ServiceError::UnknownAuthor(req.posted_by));
        }

        let message = self
            .store
            .create_message(req.posted_by, &req.message_text, req.posted_at)?;
        Ok(message.into())
    }

    pub fn all_messages(&self) -> ServiceResult<Vec<Message>> {
        let rows = self.store.get_all_messages()?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    pub fn message(&self, message_id: i64) -> ServiceResult<Option<Message>> {
        Ok(self.store.get_message_by_id(message_id)?.map(Message::from))
    }

    pub fn messages_by_account(&self, account_id: i64) -> ServiceResult<Vec<Message>> {
        let rows = self.store.get_messages_by_account(account_id)?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    /// Writes the new text, then reads the message back. Updating an id that
    /// does not exist writes nothing and yields `Ok(None)`.
    pub fn update_message(&self, message_id: i64, text: &str) -> ServiceResult<Option<Message>> {
        check_message_text(text)?;

        self.store.update_message_text(message_id, text)?;
        self.message(message_id)
    }

    /// Returns the message as it was before deletion. No delete is issued for
    /// an id that does not exist.
    pub fn delete_message(&self, message_id: i64) -> ServiceResult<Option<Message>> {
        let Some(existing) = self.message(message_id)? else {
            return Ok(None);
        };

        self.store.delete_message(message_id)?;
        Ok(Some(existing))
    }
}
