use std::sync::atomic::Ordering;

use uuid::Uuid;

use hamilton_auth::domain::password::hash_password;
use hamilton_auth::domain::types::RoleGrant;
use hamilton_auth::error::AuthServiceError;
use hamilton_auth::usecase::login::LoginInput;
use hamilton_auth_types::token::validate_access_token;
use hamilton_domain::provider::Provider;

use crate::helpers::{
    MockIdentityRepo, TEST_JWT_SECRET, login_usecase, test_identity, test_user,
};

fn input(identifier: &str, password: &str, provider: Option<Provider>) -> LoginInput {
    LoginInput {
        identifier: identifier.to_owned(),
        password: password.to_owned(),
        provider,
    }
}

// ── Happy path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_superadmin_and_aggregate_roles_and_permissions() {
    let user = test_user(Some("admin@example.com"), true);
    let identity = test_identity(
        user.id,
        Provider::Email,
        "admin@example.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user.clone()], vec![identity]).with_grants(
        user.id,
        // Stored unsorted on purpose; the token must come out sorted.
        vec![RoleGrant {
            name: "superadmin".to_owned(),
            permissions: vec!["user:write".to_owned(), "user:read".to_owned()],
        }],
    );

    let out = login_usecase(repo)
        .execute(input("admin@example.com", "CorrectPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.email, "admin@example.com");
    assert_eq!(info.roles, vec!["superadmin"]);
    assert_eq!(info.perms, vec!["user:read", "user:write"]);
    assert_eq!(info.access_token_exp, out.access_token_exp);
}

#[tokio::test]
async fn should_match_identifier_case_insensitively() {
    let user = test_user(Some("admin@example.com"), true);
    let identity = test_identity(
        user.id,
        Provider::Email,
        "admin@example.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user.clone()], vec![identity]);

    let out = login_usecase(repo)
        .execute(input("  ADMIN@Example.COM ", "CorrectPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
}

#[tokio::test]
async fn should_sort_and_deduplicate_roles_and_permissions_across_grants() {
    let user = test_user(None, true);
    let identity = test_identity(
        user.id,
        Provider::Username,
        "frontdesk",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user.clone()], vec![identity]).with_grants(
        user.id,
        vec![
            RoleGrant {
                name: "ops".to_owned(),
                permissions: vec!["user:read".to_owned(), "room:assign".to_owned()],
            },
            RoleGrant {
                name: "admin".to_owned(),
                permissions: vec!["user:read".to_owned(), "user:write".to_owned()],
            },
        ],
    );

    let out = login_usecase(repo)
        .execute(input("frontdesk", "CorrectPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.roles, vec!["admin", "ops"]);
    assert_eq!(info.perms, vec!["room:assign", "user:read", "user:write"]);
    // No profile email on this account — the claim is an empty string.
    assert_eq!(info.email, "");
}

// ── Uniform failure ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_wrong_password() {
    let user = test_user(Some("admin@example.com"), true);
    let identity = test_identity(
        user.id,
        Provider::Email,
        "admin@example.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user], vec![identity]);

    let result = login_usecase(repo)
        .execute(input("admin@example.com", "WrongPass", None))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_inactive_user_even_with_correct_password() {
    let user = test_user(Some("admin@example.com"), false);
    let identity = test_identity(
        user.id,
        Provider::Email,
        "admin@example.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user], vec![identity]);

    let result = login_usecase(repo)
        .execute(input("admin@example.com", "CorrectPass1", None))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_passwordless_identity_attempted_with_password() {
    let user = test_user(Some("sso@example.com"), true);
    let identity = test_identity(user.id, Provider::Email, "sso@example.com", None);
    let repo = MockIdentityRepo::new(vec![user], vec![identity]);

    let result = login_usecase(repo)
        .execute(input("sso@example.com", "AnyPassword", None))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_identity_whose_user_is_missing() {
    let identity = test_identity(
        Uuid::new_v4(),
        Provider::Email,
        "orphan@example.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(Vec::new(), vec![identity]);

    let result = login_usecase(repo)
        .execute(input("orphan@example.com", "CorrectPass1", None))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_empty_input_without_touching_the_store() {
    let repo = MockIdentityRepo::empty();
    let queries = repo.query_counter();
    let usecase = login_usecase(repo);

    let result = usecase.execute(input("", "CorrectPass1", None)).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

    let result = usecase.execute(input("admin@example.com", "", None)).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

    assert_eq!(queries.load(Ordering::SeqCst), 0);
}

// ── Provider resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_bare_identifier_to_username_before_room() {
    let clerk = test_user(Some("clerk@example.com"), true);
    let guest = test_user(Some("guest@example.com"), true);
    let username_identity = test_identity(
        clerk.id,
        Provider::Username,
        "101",
        Some(hash_password("ClerkPass1").unwrap()),
    );
    let room_identity = test_identity(
        guest.id,
        Provider::Room,
        "101",
        Some(hash_password("ClerkPass1").unwrap()),
    );
    // Room listed first: storage order must not matter.
    let repo = MockIdentityRepo::new(
        vec![clerk.clone(), guest],
        vec![room_identity, username_identity],
    );

    let out = login_usecase(repo)
        .execute(input("101", "ClerkPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, clerk.id, "username identity must win over room");
}

#[tokio::test]
async fn should_not_fall_back_to_later_providers_after_a_match() {
    let clerk = test_user(None, true);
    let guest = test_user(None, true);
    let username_identity = test_identity(
        clerk.id,
        Provider::Username,
        "101",
        Some(hash_password("ClerkPass1").unwrap()),
    );
    // The room identity would accept the attempted password — it must
    // never be consulted once the username identity has matched.
    let room_identity = test_identity(
        guest.id,
        Provider::Room,
        "101",
        Some(hash_password("GuestPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![clerk, guest], vec![username_identity, room_identity]);

    let result = login_usecase(repo)
        .execute(input("101", "GuestPass1", None))
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_use_only_the_explicit_provider_when_given() {
    let clerk = test_user(None, true);
    let guest = test_user(None, true);
    let username_identity = test_identity(
        clerk.id,
        Provider::Username,
        "101",
        Some(hash_password("ClerkPass1").unwrap()),
    );
    let room_identity = test_identity(
        guest.id,
        Provider::Room,
        "101",
        Some(hash_password("GuestPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(
        vec![clerk, guest.clone()],
        vec![username_identity, room_identity],
    );

    let out = login_usecase(repo)
        .execute(input("101", "GuestPass1", Some(Provider::Room)))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, guest.id);
}

#[tokio::test]
async fn should_try_only_email_for_identifiers_containing_at_sign() {
    let user = test_user(None, true);
    // Registered under username, and the raw identifier happens to contain
    // an "@" — the heuristic pins the attempt to email, so no match.
    let identity = test_identity(
        user.id,
        Provider::Username,
        "op@desk",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    let repo = MockIdentityRepo::new(vec![user], vec![identity]);
    let queries = repo.query_counter();
    let usecase = login_usecase(repo);

    let result = usecase.execute(input("op@desk", "CorrectPass1", None)).await;

    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    assert_eq!(queries.load(Ordering::SeqCst), 1, "only the email provider is tried");
}

// ── Duplicate identities ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_prefer_primary_identity_among_duplicates() {
    let shadow = test_user(None, true);
    let owner = test_user(Some("x@y.com"), true);
    let mut shadow_identity = test_identity(
        shadow.id,
        Provider::Email,
        "x@y.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    shadow_identity.is_primary = false;
    // Lower id than the primary row: the primary flag must still win.
    shadow_identity.id = Uuid::from_u128(1);
    let mut owner_identity = test_identity(
        owner.id,
        Provider::Email,
        "x@y.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    owner_identity.id = Uuid::from_u128(2);

    // Non-primary row listed first: storage order must not matter.
    let repo = MockIdentityRepo::new(
        vec![shadow, owner.clone()],
        vec![shadow_identity, owner_identity],
    );

    let out = login_usecase(repo)
        .execute(input("x@y.com", "CorrectPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, owner.id);
}

#[tokio::test]
async fn should_break_ties_between_non_primary_duplicates_by_lowest_id() {
    let first = test_user(None, true);
    let second = test_user(None, true);
    let mut first_identity = test_identity(
        first.id,
        Provider::Email,
        "x@y.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    first_identity.is_primary = false;
    first_identity.id = Uuid::from_u128(1);
    let mut second_identity = test_identity(
        second.id,
        Provider::Email,
        "x@y.com",
        Some(hash_password("CorrectPass1").unwrap()),
    );
    second_identity.is_primary = false;
    second_identity.id = Uuid::from_u128(2);

    let repo = MockIdentityRepo::new(
        vec![first.clone(), second],
        vec![second_identity, first_identity],
    );

    let out = login_usecase(repo)
        .execute(input("x@y.com", "CorrectPass1", None))
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, first.id);
}
