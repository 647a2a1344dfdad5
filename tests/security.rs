//! Security-focused test suite.
//!
//! Covers session cookie integrity, secret handling and the fail-closed
//! defaults of identity resolution.
//! Run with: `cargo test --features mocks --test security`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use chrono::{Duration, Utc};
use dashgate::actions::{ResolveAccessAction, SignInAction};
use dashgate::session::{
    InMemorySessionRepository, SameSite, SessionConfig, SessionData, SessionRepository,
    SessionSecret, generate_token, session_cookie, sign_session_id, verify_signed_cookie,
};
use dashgate::{
    AccessConfig, AccessError, AccessRequirement, DashgateConfig, Decision, Identity,
    IdentityResolver, MockTeamMemberRepository, Permission, Principal, evaluate,
};

fn session_config() -> SessionConfig {
    SessionConfig {
        secret_key: SessionSecret::new("security-suite-secret-that-is-long-enough"),
        ..SessionConfig::default()
    }
}

// =============================================================================
// Cookie Integrity
// =============================================================================

#[test]
fn cookie_signed_with_other_secret_is_rejected() {
    let signed = sign_session_id("session-1", &SessionSecret::new("a".repeat(32))).unwrap();

    assert!(verify_signed_cookie(&signed, &SessionSecret::new("b".repeat(32))).is_none());
}

#[test]
fn swapped_session_id_is_rejected() {
    let secret = SessionSecret::new("c".repeat(32));
    let signed = sign_session_id("session-1", &secret).unwrap();
    let (_, signature) = signed.rsplit_once('.').unwrap();

    let forged = format!("session-2.{signature}");
    assert!(verify_signed_cookie(&forged, &secret).is_none());
}

#[test]
fn malformed_cookie_values_are_rejected() {
    let secret = SessionSecret::new("d".repeat(32));

    for value in ["", ".", "no-signature", "id.not-hex", "id."] {
        assert!(verify_signed_cookie(value, &secret).is_none(), "{value}");
    }
}

#[test]
fn session_cookie_is_locked_down_by_default() {
    let cookie = session_cookie("value".to_owned(), &session_config()).to_string();

    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[test]
fn generated_tokens_are_unique() {
    let first = generate_token(32);
    let second = generate_token(32);

    assert_eq!(first.len(), 32);
    assert_ne!(first, second);
}

// =============================================================================
// Secret Handling
// =============================================================================

#[test]
fn secret_is_redacted_in_debug_and_display() {
    let secret = SessionSecret::new("super-secret-signing-key-material");

    assert!(!format!("{secret:?}").contains("super-secret"));
    assert!(!secret.to_string().contains("super-secret"));
}

#[test]
fn short_or_missing_secret_is_rejected() {
    let missing = SessionConfig::default();
    assert!(matches!(
        missing.validate(),
        Err(AccessError::ConfigurationError(_))
    ));

    let short = SessionConfig {
        secret_key: SessionSecret::new("too-short"),
        ..SessionConfig::default()
    };
    assert!(short.validate().is_err());
}

#[tokio::test]
async fn sign_in_without_secret_fails_and_leaves_no_session() {
    let sessions = InMemorySessionRepository::new();

    for config in [
        DashgateConfig::default(),
        DashgateConfig::strict(SessionSecret::default()),
        DashgateConfig::strict(SessionSecret::new("too-short")),
    ] {
        let action = SignInAction::new(sessions.clone(), config.session);
        let result = action
            .execute(Principal::mock_from_email("ops@example.com"))
            .await;

        assert!(matches!(result, Err(AccessError::ConfigurationError(_))));
    }

    assert!(sessions.is_empty());
}

#[test]
fn empty_secret_cannot_sign_cookies() {
    let result = sign_session_id("session-1", &SessionSecret::default());

    assert!(matches!(result, Err(AccessError::ConfigurationError(_))));
}

#[test]
fn same_site_none_requires_secure() {
    let config = SessionConfig {
        cookie_same_site: SameSite::None,
        cookie_secure: false,
        ..session_config()
    };

    assert!(config.validate().is_err());
}

// =============================================================================
// Session Lifetime
// =============================================================================

#[tokio::test]
async fn expired_session_resolves_to_anonymous_and_is_destroyed() {
    let sessions = InMemorySessionRepository::new();
    let config = session_config();

    let mut data = SessionData::new(Principal::mock_from_email("ops@example.com"), Duration::hours(1));
    data.expires_at = Utc::now() - Duration::minutes(1);
    let session_id = sessions.create(data).await.unwrap();
    let cookie = sign_session_id(&session_id, &config.secret_key).unwrap();

    let resolver = IdentityResolver::new(MockTeamMemberRepository::new(), AccessConfig::default());
    let action = ResolveAccessAction::new(sessions.clone(), resolver, config);

    let state = action.execute(Some(&cookie)).await.unwrap();
    assert_eq!(state.identity(), Some(&Identity::Anonymous));
    assert!(sessions.find(&session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn cookie_outlives_destroyed_session() {
    let sessions = InMemorySessionRepository::new();
    let config = session_config();

    let signed = SignInAction::new(sessions.clone(), config.clone())
        .execute(Principal::mock_from_email("ops@example.com"))
        .await
        .unwrap();
    sessions
        .destroy_principal_sessions("uid-ops")
        .await
        .unwrap();

    let resolver = IdentityResolver::new(MockTeamMemberRepository::new(), AccessConfig::default());
    let action = ResolveAccessAction::new(sessions, resolver, config);

    let principal = action.principal(Some(&signed.cookie_value)).await.unwrap();
    assert!(principal.is_none());
}

// =============================================================================
// Fail-Closed Defaults
// =============================================================================

#[tokio::test]
async fn unreachable_store_denies_by_default() {
    let members = MockTeamMemberRepository::new();
    members.fail_lookups(true);
    let resolver = IdentityResolver::new(members, AccessConfig::default());

    let identity = resolver
        .resolve(Some(Principal::mock_from_email("ops@example.com")))
        .await;

    assert!(matches!(identity, Identity::LookupFailed { .. }));
    for requirement in [
        AccessRequirement::authenticated(),
        AccessRequirement::permission(Permission::Teams),
    ] {
        assert_eq!(
            evaluate(&requirement, &identity.clone().into()),
            Decision::Deny
        );
    }
}
