// utils/token_generator.rs
use rand::{rng, Rng};

/// Generate an email verification token: 32 random bytes, hex encoded.
pub fn generate_verification_token() -> String {
    let mut rng = rng();
    (0..32)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let token = generate_verification_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_verification_token(), generate_verification_token());
    }
}
