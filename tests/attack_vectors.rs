//! Tests against tampering and algorithm confusion
//!
//! Tokens are crafted by hand so the tests do not depend on the encoder.

use hmac::{Hmac, Mac};
use jwtseal::utils::base64url;
use jwtseal::*;
use sha2::Sha256;

const SECRET: &[u8] = b"secret";

/// Sign arbitrary header and payload JSON with HMAC-SHA256 over `SECRET`
fn craft_hs256(header: &str, payload: &str) -> String {
    let signing_input = format!(
        "{}.{}",
        base64url::encode(header),
        base64url::encode(payload)
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET).unwrap();
    mac.update(signing_input.as_bytes());
    let signature = base64url::encode_bytes(&mac.finalize().into_bytes());
    format!("{signing_input}.{signature}")
}

fn unsigned(header: &str, payload: &str) -> String {
    format!(
        "{}.{}.",
        base64url::encode(header),
        base64url::encode(payload)
    )
}

fn engine() -> JwtEngine {
    JwtEngine::new(SECRET).unwrap()
}

// ============================================================================
// Signature Tampering
// ============================================================================

#[test]
fn test_tampering_any_signature_character_is_detected() {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    let engine = engine();
    let token = engine
        .encode(&ClaimSet::new().with("id", "alice").unwrap(), None)
        .unwrap();
    let signature_start = token.rfind('.').unwrap() + 1;

    for position in signature_start..token.len() {
        let original = token.as_bytes()[position];
        let replacement = ALPHABET.iter().copied().find(|c| *c != original).unwrap();

        let mut tampered = token.clone().into_bytes();
        tampered[position] = replacement;
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(
            matches!(engine.verify(&tampered), Err(Error::SignatureInvalid)),
            "tampering position {position} went undetected"
        );
    }
}

#[test]
fn test_tampered_payload_is_detected() {
    let engine = engine();
    let token = engine
        .encode(&ClaimSet::new().with("admin", false).unwrap(), None)
        .unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    let forged_payload = base64url::encode(r#"{"admin":true}"#);
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    assert!(matches!(engine.verify(&forged), Err(Error::SignatureInvalid)));
}

#[test]
fn test_truncated_signature_is_rejected() {
    let engine = engine();
    let token = engine.encode(&ClaimSet::new(), None).unwrap();

    let truncated = &token[..token.len() - 4];
    assert!(matches!(engine.verify(truncated), Err(Error::SignatureInvalid)));

    let stripped = &token[..=token.rfind('.').unwrap()];
    assert!(matches!(engine.verify(stripped), Err(Error::SignatureInvalid)));
}

#[test]
fn test_signature_from_other_secret_is_rejected() {
    let token = JwtEngine::new(b"attacker-secret")
        .unwrap()
        .encode(&ClaimSet::new().with("admin", true).unwrap(), None)
        .unwrap();

    assert!(matches!(engine().verify(&token), Err(Error::SignatureInvalid)));
    assert!(engine().decode_or_empty(Some(token.as_str())).is_empty());
}

// ============================================================================
// "none" Algorithm
// ============================================================================

#[test]
fn test_none_algorithm_variants_are_rejected() {
    for alg in ["none", "None", "NONE", "nOnE"] {
        let token = unsigned(&format!(r#"{{"alg":"{alg}"}}"#), r#"{"admin":true}"#);
        assert!(
            matches!(engine().verify(&token), Err(Error::UnsupportedAlgorithm(_))),
            "alg {alg} was not rejected"
        );
    }
}

#[test]
fn test_lowercase_hmac_names_are_rejected() {
    let token = craft_hs256(r#"{"alg":"hs256"}"#, r#"{"id":"alice"}"#);
    assert!(matches!(
        engine().verify(&token),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}

// ============================================================================
// Algorithm Confusion
// ============================================================================

#[test]
fn test_rs256_header_with_valid_hmac_signature_is_rejected() {
    // Signed with HMAC-SHA256 over the shared secret, but the header claims RS256
    let token = craft_hs256(r#"{"alg":"RS256","typ":"JWT"}"#, r#"{"id":"alice"}"#);
    assert!(matches!(
        engine().verify(&token),
        Err(Error::UnsupportedAlgorithm(alg)) if alg.starts_with("RS256")
    ));
}

#[test]
fn test_rsa_family_is_never_verified() {
    for alg in ["RS256", "RS384", "RS512"] {
        let token = craft_hs256(&format!(r#"{{"alg":"{alg}"}}"#), "{}");
        let permissive = JwtEngine::builder()
            .secret(SECRET)
            .algorithms(AlgorithmPolicy::allow_only(vec![
                AlgorithmId::HS256,
                AlgorithmId::RS256,
                AlgorithmId::RS384,
                AlgorithmId::RS512,
            ]))
            .build()
            .unwrap();

        assert!(matches!(
            permissive.verify(&token),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }
}

#[test]
fn test_pinned_policy_rejects_other_hmac_variants() {
    let engine = JwtEngine::builder()
        .secret(SECRET)
        .algorithms(AlgorithmPolicy::hs256_only())
        .build()
        .unwrap();

    let hs512 = JwtEngine::builder()
        .secret(SECRET)
        .algorithm(AlgorithmId::HS512)
        .build()
        .unwrap()
        .encode(&ClaimSet::new(), None)
        .unwrap();

    assert!(matches!(
        engine.verify(&hs512),
        Err(Error::UnsupportedAlgorithm(alg)) if alg.starts_with("HS512")
    ));

    let hs256 = engine.encode(&ClaimSet::new(), None).unwrap();
    assert!(engine.verify(&hs256).is_ok());
}

#[test]
fn test_unknown_algorithm_is_reported_before_signature() {
    let token = format!(
        "{}.{}.not-a-signature",
        base64url::encode(r#"{"alg":"ES256"}"#),
        base64url::encode("{}")
    );
    assert!(matches!(
        engine().verify(&token),
        Err(Error::UnsupportedAlgorithm(alg)) if alg == "ES256"
    ));
}

// ============================================================================
// Resource Limits
// ============================================================================

#[test]
fn test_oversized_token_is_rejected() {
    let huge = "A".repeat(70 * 1024);
    let token = format!("{huge}.{huge}.{huge}");
    assert!(matches!(
        engine().verify(&token),
        Err(Error::MalformedToken(_))
    ));
}

#[test]
fn test_oversized_algorithm_name_is_rejected() {
    for alg in ["H".repeat(64), "HS256-EXTENDED-LONG".to_string()] {
        let token = craft_hs256(&format!(r#"{{"alg":"{alg}"}}"#), "{}");
        match engine().verify(&token) {
            Err(Error::UnsupportedAlgorithm(reported)) => assert!(!reported.contains(&alg)),
            other => panic!("expected UnsupportedAlgorithm, got {other:?}"),
        }
    }
}
