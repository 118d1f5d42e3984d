// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token tests.
//!
//! These tests verify that tokens created at login can be decoded by the
//! auth middleware, catching compatibility issues early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use levelhub::middleware::auth::{create_jwt, Claims};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    // A token created by the auth flow must decode with the middleware's
    // Claims struct and algorithm.
    let user_id = 12345678u64;
    let token = create_jwt(user_id, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, user_id.to_string());
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_user_id_parsing() {
    // The sub claim must parse back to u64
    let user_id = 98765432u64;
    let token = create_jwt(user_id, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let parsed_id: u64 = token_data
        .claims
        .sub
        .parse()
        .expect("sub claim should be parseable as u64");

    assert_eq!(parsed_id, user_id);
}

#[test]
fn test_jwt_rejects_wrong_key() {
    let token = create_jwt(12345, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(b"a_different_signing_key_entirely");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt(12345, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Token should expire at least 29 days in the future
    assert!(
        token_data.claims.exp > now + 86400 * 29,
        "Token expiration should be ~30 days in the future"
    );
}
