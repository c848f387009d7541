//! Unit tests for registration domain types.

use chrono::Duration;
use rstest::rstest;

use super::support::{FixedClock, base_time};
use crate::registration::domain::{
    ActivationKey, ActivationToken, EmailAddress, ParseActivationKeyError,
    RegistrationDomainError, RegistrationProfile, UserId, Username,
};

fn clock() -> FixedClock {
    FixedClock::at(base_time())
}

// ── ActivationToken generation and parsing ─────────────────────────

#[rstest]
fn generated_token_is_forty_lowercase_hex_characters() {
    let token = ActivationToken::generate(UserId::new(), &clock());

    assert_eq!(token.as_str().len(), 40);
    assert!(
        token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
}

#[rstest]
fn generated_tokens_differ_between_issuances() {
    let user_id = UserId::new();
    let first = ActivationToken::generate(user_id, &clock());
    let second = ActivationToken::generate(user_id, &clock());

    assert_ne!(first, second);
}

#[rstest]
fn well_formed_token_round_trips_through_parse() {
    let token = ActivationToken::generate(UserId::new(), &clock());
    let parsed = ActivationToken::parse(token.as_str()).expect("shape should be accepted");

    assert_eq!(parsed, token);
}

#[rstest]
#[case("foo")]
#[case("")]
#[case("abcdef0123456789abcdef0123456789abcdef0")]
#[case("abcdef0123456789abcdef0123456789abcdef012")]
#[case("ABCDEF0123456789ABCDEF0123456789ABCDEF01")]
#[case("ghijkl0123456789abcdef0123456789abcdef01")]
#[case("ALREADY_ACTIVATED")]
fn malformed_candidate_tokens_are_rejected(#[case] candidate: &str) {
    let result = ActivationToken::parse(candidate);
    assert!(matches!(
        result,
        Err(RegistrationDomainError::MalformedActivationKey)
    ));
}

// ── ActivationKey storage representation ───────────────────────────

#[rstest]
fn pending_key_round_trips_through_storage_form() {
    let token = ActivationToken::generate(UserId::new(), &clock());
    let key = ActivationKey::Pending(token.clone());

    let parsed = ActivationKey::try_from(key.as_str()).expect("storage form should parse");
    assert_eq!(parsed, ActivationKey::Pending(token));
}

#[rstest]
fn consumed_sentinel_round_trips_through_storage_form() {
    let parsed =
        ActivationKey::try_from(ActivationKey::CONSUMED_SENTINEL).expect("sentinel should parse");
    assert!(parsed.is_consumed());
    assert_eq!(parsed.as_str(), "ALREADY_ACTIVATED");
}

#[rstest]
fn garbage_storage_form_is_rejected() {
    let result = ActivationKey::try_from("not-a-key");
    assert!(matches!(result, Err(ParseActivationKeyError(_))));
}

// ── RegistrationProfile transitions ────────────────────────────────

#[rstest]
fn new_profile_is_pending_and_not_activated() {
    let profile = RegistrationProfile::new(UserId::new(), &clock());

    assert!(!profile.is_activated());
    assert!(profile.pending_token().is_some());
    assert!(!profile.activation_key().is_consumed());
}

#[rstest]
fn consume_key_activates_and_writes_the_sentinel() {
    let mut profile = RegistrationProfile::new(UserId::new(), &clock());
    profile.consume_key();

    assert!(profile.is_activated());
    assert!(profile.activation_key().is_consumed());
    assert_eq!(
        profile.activation_key().as_str(),
        ActivationKey::CONSUMED_SENTINEL
    );
    assert!(profile.pending_token().is_none());
}

#[rstest]
fn mark_activated_keeps_the_pending_token() {
    let mut profile = RegistrationProfile::new(UserId::new(), &clock());
    let original_token = profile.pending_token().cloned();
    profile.mark_activated();

    assert!(profile.is_activated());
    assert_eq!(profile.pending_token().cloned(), original_token);
}

#[rstest]
fn renew_key_issues_a_different_token() {
    let mut profile = RegistrationProfile::new(UserId::new(), &clock());
    let original_token = profile.pending_token().cloned();
    profile.renew_key(&clock());

    assert!(profile.pending_token().is_some());
    assert_ne!(profile.pending_token().cloned(), original_token);
}

// ── Expiry, boundary inclusive ─────────────────────────────────────

#[rstest]
fn fresh_profile_within_window_is_not_expired() {
    let profile = RegistrationProfile::new(UserId::new(), &clock());
    let window = Duration::days(7);

    let just_inside = FixedClock::at(base_time() + window - Duration::seconds(1));
    assert!(!profile.is_expired(base_time(), window, &just_inside));
}

#[rstest]
fn profile_at_the_window_boundary_is_expired() {
    let profile = RegistrationProfile::new(UserId::new(), &clock());
    let window = Duration::days(7);

    let at_boundary = FixedClock::at(base_time() + window);
    assert!(profile.is_expired(base_time(), window, &at_boundary));
}

#[rstest]
fn profile_past_the_window_is_expired() {
    let profile = RegistrationProfile::new(UserId::new(), &clock());
    let window = Duration::days(7);

    let past = FixedClock::at(base_time() + window + Duration::days(1));
    assert!(profile.is_expired(base_time(), window, &past));
}

#[rstest]
fn consumed_profile_is_expired_regardless_of_date() {
    let mut profile = RegistrationProfile::new(UserId::new(), &clock());
    profile.consume_key();

    assert!(profile.is_expired(base_time(), Duration::days(7), &clock()));
}

// ── Username validation ────────────────────────────────────────────

#[rstest]
#[case("alice")]
#[case("alice.bob")]
#[case("alice+spam@example")]
#[case("under_score-dash")]
fn valid_usernames_are_accepted(#[case] input: &str) {
    let username = Username::new(input);
    assert!(username.is_ok(), "expected '{input}' to be valid");
    assert_eq!(username.expect("valid username").as_str(), input);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_or_whitespace_username_is_rejected(#[case] input: &str) {
    let result = Username::new(input);
    assert!(matches!(result, Err(RegistrationDomainError::EmptyUsername)));
}

#[rstest]
#[case("has space")]
#[case("wavy~name")]
#[case("slash/name")]
fn invalid_characters_in_username_are_rejected(#[case] input: &str) {
    let result = Username::new(input);
    assert!(matches!(
        result,
        Err(RegistrationDomainError::InvalidUsername(_))
    ));
}

#[rstest]
#[case(150, true)]
#[case(151, false)]
fn username_length_boundary(#[case] length: usize, #[case] expected_ok: bool) {
    let name = "a".repeat(length);
    let result = Username::new(&name);
    if expected_ok {
        assert!(result.is_ok(), "expected length {length} to be accepted");
    } else {
        assert!(
            matches!(result, Err(RegistrationDomainError::UsernameTooLong(_))),
            "expected length {length} to be rejected"
        );
    }
}

// ── EmailAddress validation ────────────────────────────────────────

#[rstest]
#[case("alice@example.com")]
#[case("alice+spam@mail.example.org")]
fn valid_email_addresses_are_accepted(#[case] input: &str) {
    let email = EmailAddress::new(input);
    assert!(email.is_ok(), "expected '{input}' to be valid");
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_email_address_is_rejected(#[case] input: &str) {
    let result = EmailAddress::new(input);
    assert!(matches!(
        result,
        Err(RegistrationDomainError::EmptyEmailAddress)
    ));
}

#[rstest]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("alice@")]
#[case("alice@@example.com")]
fn malformed_email_address_is_rejected(#[case] input: &str) {
    let result = EmailAddress::new(input);
    assert!(matches!(
        result,
        Err(RegistrationDomainError::InvalidEmailAddress(_))
    ));
}
