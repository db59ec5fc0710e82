//! Room code generation.
//!
//! Codes only need to avoid collisions, not resist guessing, so a plain
//! thread-local RNG is enough. Uniqueness is the caller's job: it checks
//! the store's code index and retries up to [`MAX_CODE_ATTEMPTS`] times.

use rand::Rng;
use thinkinghat_protocol::{ROOM_CODE_ALPHABET, RoomCode};

/// How many fresh codes a caller tries before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Draws `length` characters uniformly from [`ROOM_CODE_ALPHABET`].
pub fn generate_room_code(length: usize) -> RoomCode {
    let alphabet = ROOM_CODE_ALPHABET.as_bytes();
    let mut rng = rand::rng();
    let code: String = (0..length)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect();
    RoomCode::normalize(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thinkinghat_protocol::ROOM_CODE_LENGTH;

    #[test]
    fn test_generate_room_code_has_requested_length() {
        assert_eq!(generate_room_code(ROOM_CODE_LENGTH).as_str().len(), 5);
        assert_eq!(generate_room_code(8).as_str().len(), 8);
    }

    #[test]
    fn test_generate_room_code_only_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_room_code(ROOM_CODE_LENGTH);
            assert!(code.is_well_formed(), "bad code {code}");
            assert!(!code.as_str().contains(['I', 'O', '0', '1']));
        }
    }

    #[test]
    fn test_generate_room_code_varies() {
        let codes: std::collections::HashSet<String> = (0..50)
            .map(|_| generate_room_code(ROOM_CODE_LENGTH).to_string())
            .collect();
        assert!(codes.len() > 1);
    }
}
