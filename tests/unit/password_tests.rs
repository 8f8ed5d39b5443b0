// ============================
// tests/unit/password_tests.rs
// ============================
//! Unit tests for password hashing
use backend_lib::auth::{hash_password, verify_password, AuthService, DefaultAuth, TokenService};

const COST: u8 = 4;

#[test]
fn test_hash_and_verify() {
    let hash = hash_password("correct horse", COST).unwrap();
    assert!(hash.starts_with("$scrypt$"));
    assert!(verify_password(&hash, "correct horse"));
    assert!(!verify_password(&hash, "wrong horse"));
}

#[test]
fn test_equal_passwords_get_distinct_salts() {
    let first = hash_password("same-password", COST).unwrap();
    let second = hash_password("same-password", COST).unwrap();
    assert_ne!(first, second);
    assert!(verify_password(&first, "same-password"));
    assert!(verify_password(&second, "same-password"));
}

#[test]
fn test_verify_reads_cost_from_stored_hash() {
    let hash = hash_password("secret1", 5).unwrap();
    assert!(verify_password(&hash, "secret1"));
}

#[test]
fn test_garbage_hash_never_verifies() {
    assert!(!verify_password("not-a-phc-string", "anything"));
}

#[tokio::test]
async fn test_auth_service_hashes_off_the_runtime() {
    let auth = DefaultAuth::new(TokenService::new("secret", 24), COST);
    let hash = auth.hash_password("password123").await.unwrap();
    assert!(auth.verify_password(&hash, "password123").await.unwrap());
    assert!(!auth.verify_password(&hash, "password124").await.unwrap());
}
