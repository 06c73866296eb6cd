use anyhow::Result;

use crate::models::{AccountRow, MessageRow};

/// Persistence operations the service layer depends on.
///
/// `Database` is the production implementation; tests substitute their own
/// to exercise store failures.
pub trait Store: Send + Sync + 'static {
    /// Insert an account and return it with its generated id.
    fn create_account(&self, username: &str, password: &str) -> Result<AccountRow>;
    fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>>;
    fn get_account_by_id(&self, account_id: i64) -> Result<Option<AccountRow>>;

    fn create_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow>;
    fn get_all_messages(&self) -> Result<Vec<MessageRow>>;
    fn get_message_by_id(&self, message_id: i64) -> Result<Option<MessageRow>>;
    fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>>;

    /// Update and delete return the number of rows changed, 0 when the id
    /// does not exist.
    fn update_message_text(&self, message_id: i64, message_text: &str) -> Result<usize>;
    fn delete_message(&self, message_id: i64) -> Result<usize>;
}
