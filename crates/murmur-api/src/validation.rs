use crate::error::ValidationError;

// Lengths are in UTF-16 code units, so a character outside the BMP counts
// as two.
pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_MESSAGE_LEN: usize = 255;

/// Rules for a new account, checked in order. Uniqueness needs the store and
/// is checked by the service afterwards.
pub fn check_new_account(username: &str, password: &str) -> Result<(), ValidationError> {
    if is_blank(username) {
        return Err(ValidationError::BlankUsername);
    }
    if utf16_len(password) < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Applies to both creating and editing a message.
pub fn check_message_text(text: &str) -> Result<(), ValidationError> {
    if is_blank(text) {
        return Err(ValidationError::BlankMessage);
    }
    if utf16_len(text) > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong {
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_usernames_are_rejected() {
        for name in ["", " ", "\t\n", "   "] {
            assert_eq!(
                check_new_account(name, "password"),
                Err(ValidationError::BlankUsername),
                "{name:?}"
            );
        }
    }

    #[test]
    fn username_checked_before_password() {
        assert_eq!(check_new_account("", "x"), Err(ValidationError::BlankUsername));
    }

    #[test]
    fn password_minimum_length() {
        assert!(matches!(
            check_new_account("bob", "abc"),
            Err(ValidationError::PasswordTooShort { min: 4 })
        ));
        assert!(check_new_account("bob", "abcd").is_ok());
        // Whitespace counts toward length; only usernames must be non-blank.
        assert!(check_new_account("bob", "    ").is_ok());
    }

    #[test]
    fn message_length_bound_is_inclusive() {
        assert!(check_message_text(&"a".repeat(255)).is_ok());
        assert_eq!(
            check_message_text(&"a".repeat(256)),
            Err(ValidationError::MessageTooLong { max: 255 })
        );
    }

    #[test]
    fn message_length_counts_utf16_units() {
        // 255 two-byte characters is 510 bytes but 255 units.
        assert!(check_message_text(&"é".repeat(255)).is_ok());

        // Each emoji is a surrogate pair.
        let at_limit = format!("{}a", "\u{1F600}".repeat(127));
        assert!(check_message_text(&at_limit).is_ok());
        assert_eq!(
            check_message_text(&"\u{1F600}".repeat(128)),
            Err(ValidationError::MessageTooLong { max: 255 })
        );
        assert!(check_message_text(&"\u{1F600}".repeat(200)).is_err());
    }

    #[test]
    fn password_length_counts_utf16_units() {
        assert!(check_new_account("bob", "\u{1F600}\u{1F600}").is_ok());
        assert!(matches!(
            check_new_account("bob", "\u{1F600}a"),
            Err(ValidationError::PasswordTooShort { min: 4 })
        ));
    }

    #[test]
    fn blank_message_rejected() {
        assert_eq!(check_message_text(""), Err(ValidationError::BlankMessage));
        assert_eq!(check_message_text("  \n"), Err(ValidationError::BlankMessage));
        assert!(check_message_text(" hi ").is_ok());
    }
}
