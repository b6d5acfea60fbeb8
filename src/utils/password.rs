use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ErrorMessage;

const MAX_PASSWORD_LENGTH: usize = 64;

pub fn hash(password: impl Into<String>) -> Result<String, String> {
    let password = password.into();

    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must not be more than {} characters",
            MAX_PASSWORD_LENGTH
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| e.to_string())?
        .to_string();

    Ok(hashed)
}

pub fn compare(password: &str, hashed_password: &str) -> Result<bool, String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|_| ErrorMessage::ServerError.to_string())?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_compare_round_trip() {
        let hashed = hash("correct horse battery").unwrap();
        assert_ne!(hashed, "correct horse battery");
        assert!(compare("correct horse battery", &hashed).unwrap());
        assert!(!compare("wrong password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same password").unwrap();
        let b = hash("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(hash("").is_err());
        assert!(compare("", "whatever").is_err());
    }

    #[test]
    fn overlong_password_is_rejected() {
        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(hash(long).is_err());
    }

    #[test]
    fn garbage_stored_hash_is_a_server_error() {
        let err = compare("password", "not-a-phc-string").unwrap_err();
        assert_eq!(err, ErrorMessage::ServerError.to_string());
    }
}
