use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated session ids.
pub const SESSION_ID_LENGTH: usize = 32;

/// Random alphanumeric string from the thread-local CSPRNG.
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub fn generate_session_id() -> String {
    generate_token(SESSION_ID_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = generate_token(48);

        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
