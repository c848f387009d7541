//! Unit tests for the self-service registration lifecycle.

use chrono::Duration;
use rstest::{fixture, rstest};

use super::support::{Harness, alice_request, base_time, site, standard_config};
use crate::registration::{
    domain::ActivationKey,
    ports::{ProfileRepository, UserDirectory},
    services::{RegisterRequest, RegistrationError},
};

#[fixture]
fn harness() -> Harness {
    Harness::new(standard_config())
}

// ── Registration ───────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_creates_inactive_account_and_pending_profile(harness: Harness) {
    let account = harness
        .service()
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");

    assert_eq!(account.username().as_str(), "alice");
    assert_eq!(account.email().as_str(), "alice@example.com");
    assert!(!account.is_active());
    assert_eq!(account.joined_at(), base_time());

    let profile = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert!(!profile.is_activated());
    let token = profile.pending_token().expect("token should be pending");
    assert_eq!(token.as_str().len(), 40);
    assert!(
        token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_sends_one_activation_email(harness: Harness) {
    harness
        .service()
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");

    let messages = harness.outbox.messages().expect("outbox should be readable");
    assert_eq!(messages.len(), 1);
    let first = messages.first().expect("one message");
    assert_eq!(first.to(), ["alice@example.com"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_without_email_sends_nothing(harness: Harness) {
    harness
        .service()
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");

    assert_eq!(harness.outbox.count().expect("outbox readable"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_resets_pre_aged_join_timestamp(harness: Harness) {
    let pre_aged = base_time() - Duration::days(8);
    let account = harness
        .service()
        .register(alice_request().with_joined_at(pre_aged), &site())
        .await
        .expect("registration should succeed");

    assert_eq!(account.joined_at(), base_time());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_preserves_recent_join_timestamp(harness: Harness) {
    let recent = base_time() - Duration::days(2);
    let account = harness
        .service()
        .register(alice_request().with_joined_at(recent), &site())
        .await
        .expect("registration should succeed");

    assert_eq!(account.joined_at(), recent);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_leaves_no_stray_profile(harness: Harness) {
    let service = harness.service();
    service
        .register(alice_request(), &site())
        .await
        .expect("first registration should succeed");

    let duplicate = service
        .register(
            RegisterRequest::new("alice", "other@example.com", "hunter2"),
            &site(),
        )
        .await;

    assert!(duplicate.is_err());
    assert_eq!(harness.profiles.count().expect("count readable"), 1);
    assert_eq!(harness.outbox.count().expect("outbox readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_profile_for_the_same_account_is_rejected(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");

    let duplicate = service.create_profile(&account).await;

    assert!(matches!(duplicate, Err(RegistrationError::DuplicateProfile)));
    assert_eq!(harness.profiles.count().expect("count readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_password_verifies_through_the_directory(harness: Harness) {
    let account = harness
        .service()
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");

    assert!(
        harness
            .directory
            .verify_password(account.id(), "swordfish")
            .await
            .expect("verification should succeed")
    );
    assert!(
        !harness
            .directory
            .verify_password(account.id(), "wrong")
            .await
            .expect("verification should succeed")
    );
}

// ── Activation ─────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn valid_key_activates_the_account_and_consumes_the_token(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let profile = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    let token = profile.pending_token().expect("token pending").clone();

    let activated = service
        .activate(token.as_str(), &site())
        .await
        .expect("activation should succeed");

    assert_eq!(activated.id(), account.id());
    assert!(activated.is_active());

    let updated_profile = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert!(updated_profile.is_activated());
    assert_eq!(
        updated_profile.activation_key().as_str(),
        ActivationKey::CONSUMED_SENTINEL
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activate_profile_returns_the_profile(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();

    let activated_profile = service
        .activate_profile(token.as_str(), &site())
        .await
        .expect("activation should succeed");

    assert!(activated_profile.is_activated());
    assert_eq!(activated_profile.user_id(), account.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activation_key_is_single_use(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();

    service
        .activate(token.as_str(), &site())
        .await
        .expect("first activation should succeed");

    let second = service.activate(token.as_str(), &site()).await;
    assert!(matches!(second, Err(RegistrationError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_key_fails_before_any_lookup(harness: Harness) {
    let result = harness.service().activate("foo", &site()).await;

    assert!(matches!(result, Err(RegistrationError::MalformedKey)));
    assert_eq!(harness.profiles.token_lookups(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn well_formed_unknown_key_fails_after_one_lookup(harness: Harness) {
    let unknown_key = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
    let result = harness.service().activate(unknown_key, &site()).await;

    assert!(matches!(result, Err(RegistrationError::NotFound)));
    assert_eq!(harness.profiles.token_lookups(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_key_fails_and_leaves_state_untouched(harness: Harness) {
    let account = harness
        .service()
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();

    let late_service = harness.service_at(base_time() + Duration::days(7));
    let result = late_service.activate(token.as_str(), &site()).await;

    assert!(matches!(result, Err(RegistrationError::Expired)));

    let untouched_account = harness
        .directory
        .find_by_id(account.id())
        .await
        .expect("lookup should succeed")
        .expect("account should remain");
    assert!(!untouched_account.is_active());
    let untouched_profile = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should remain");
    assert!(!untouched_profile.is_activated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activation_just_inside_the_window_succeeds(harness: Harness) {
    let account = harness
        .service()
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();

    let almost_late = harness.service_at(base_time() + Duration::days(7) - Duration::seconds(1));
    let activated = almost_late
        .activate(token.as_str(), &site())
        .await
        .expect("activation inside the window should succeed");

    assert!(activated.is_active());
}

// ── Resending the activation email ─────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resend_rotates_the_key_and_sends_exactly_one_message(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");
    let original_token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();

    service
        .resend_activation("alice@example.com", &site())
        .await
        .expect("resend should succeed");

    let rotated_token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();
    assert_ne!(rotated_token, original_token);
    assert_eq!(harness.outbox.count().expect("outbox readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resend_for_unknown_address_sends_nothing(harness: Harness) {
    let result = harness
        .service()
        .resend_activation("alice@example.com", &site())
        .await;

    assert!(matches!(result, Err(RegistrationError::NotFound)));
    assert_eq!(harness.outbox.count().expect("outbox readable"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resend_for_activated_account_sends_nothing(harness: Harness) {
    let service = harness.service();
    let account = service
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");
    let token = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone();
    let activated = service
        .activate(token.as_str(), &site())
        .await
        .expect("activation should succeed");
    assert!(activated.is_active());

    let result = service.resend_activation("alice@example.com", &site()).await;

    assert!(matches!(result, Err(RegistrationError::AlreadyActivated)));
    assert_eq!(harness.outbox.count().expect("outbox readable"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resend_for_expired_registration_sends_nothing(harness: Harness) {
    harness
        .service()
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");

    let late_service = harness.service_at(base_time() + Duration::days(8));
    let result = late_service
        .resend_activation("alice@example.com", &site())
        .await;

    assert!(matches!(result, Err(RegistrationError::Expired)));
    assert_eq!(harness.outbox.count().expect("outbox readable"), 0);
}
