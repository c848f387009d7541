//! End-to-end registration lifecycle tests over the in-memory adapters.

use chrono::Duration;
use rstest::rstest;

use super::helpers::{
    Harness, alice_request, base_time, site, standard_config, supervised_config,
};
use vestibule::registration::{
    domain::ActivationToken,
    ports::{ProfileRepository, UserDirectory},
    services::RegistrationError,
};

async fn pending_token(harness: &Harness, user_id: vestibule::registration::domain::UserId) -> ActivationToken {
    harness
        .profiles
        .find_by_user(user_id)
        .await
        .expect("lookup should succeed")
        .expect("profile should exist")
        .pending_token()
        .expect("token pending")
        .clone()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_registration_is_unusable_and_swept_away() {
    let harness = Harness::new(standard_config());
    let service = harness.service();

    // Register alice: inactive account, hex-shaped key, one notification.
    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    assert!(!account.is_active());

    let token = pending_token(&harness, account.id()).await;
    assert_eq!(token.as_str().len(), 40);
    assert!(
        token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );

    let messages = harness.outbox.messages().expect("outbox readable");
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.first().expect("one message").to(),
        ["alice@example.com"]
    );

    // Past the window, the key no longer activates anything.
    let late = harness.service_at(base_time() + Duration::days(8));
    let result = late.activate(token.as_str(), &site()).await;
    assert!(matches!(result, Err(RegistrationError::Expired)));

    let still_inactive = harness
        .directory
        .find_by_id(account.id())
        .await
        .expect("lookup should succeed")
        .expect("account should remain");
    assert!(!still_inactive.is_active());

    // The sweep then removes alice from the directory entirely.
    let outcome = late.sweep_expired().await.expect("sweep should succeed");
    assert_eq!(outcome.deleted_accounts, 1);
    assert!(
        harness
            .directory
            .find_by_id(account.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert_eq!(harness.profiles.count().expect("count readable"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn self_service_activation_completes_in_one_step() {
    let harness = Harness::new(standard_config());
    let service = harness.service();

    let account = service
        .register(alice_request(), &site())
        .await
        .expect("registration should succeed");
    let token = pending_token(&harness, account.id()).await;

    let activated = service
        .activate(token.as_str(), &site())
        .await
        .expect("activation should succeed");
    assert!(activated.is_active());

    // The consumed key cannot be presented again.
    let replay = service.activate(token.as_str(), &site()).await;
    assert!(matches!(replay, Err(RegistrationError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn supervised_activation_requires_separate_approval() {
    let harness = Harness::new(supervised_config());
    let service = harness.service();

    let account = service
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");
    let token = pending_token(&harness, account.id()).await;

    let ready = service
        .activate(token.as_str(), &site())
        .await
        .expect("activation should succeed");
    assert!(!ready.is_active());

    let admin_notice = harness.outbox.messages().expect("outbox readable");
    assert_eq!(admin_notice.len(), 1);
    assert_eq!(
        admin_notice.first().expect("one message").to(),
        ["ops@example.com"]
    );

    let profile = harness
        .profiles
        .find_by_user(account.id())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    let approved = service
        .approve(profile.id(), &site())
        .await
        .expect("approval should succeed");
    assert!(approved.is_active());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resend_issues_a_fresh_key_that_activates() {
    let harness = Harness::new(standard_config());
    let service = harness.service();

    let account = service
        .register(alice_request().without_activation_email(), &site())
        .await
        .expect("registration should succeed");
    let original_token = pending_token(&harness, account.id()).await;

    service
        .resend_activation("alice@example.com", &site())
        .await
        .expect("resend should succeed");

    let rotated_token = pending_token(&harness, account.id()).await;
    assert_ne!(rotated_token, original_token);
    assert_eq!(harness.outbox.count().expect("outbox readable"), 1);

    // The rotated key works; the original is dead.
    let stale = service.activate(original_token.as_str(), &site()).await;
    assert!(matches!(stale, Err(RegistrationError::NotFound)));

    let activated = service
        .activate(rotated_token.as_str(), &site())
        .await
        .expect("activation should succeed");
    assert!(activated.is_active());
}
