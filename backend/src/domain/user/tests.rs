//! Tests for user field validation and serialisation.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn alice() -> User {
    let created = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    User::new(UserRecord {
        id: UserId::new(1),
        username: Username::new("alice").expect("username"),
        email: EmailAddress::new("alice@example.com").expect("email"),
        role: Role::new(DEFAULT_ROLE).expect("role"),
        created_at: created,
        updated_at: created,
    })
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("al ice", UserValidationError::UsernameInvalidCharacters)]
#[case("bob!", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_input() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
#[case("alice")]
#[case("bob.smith-2")]
#[case("  carol_x  ")]
fn username_accepts_and_trims(#[case] raw: &str) {
    let name = Username::new(raw).expect("valid username");
    assert_eq!(name.as_ref(), raw.trim());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("not-an-email", UserValidationError::InvalidEmail)]
#[case("a@b", UserValidationError::InvalidEmail)]
#[case("a b@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_accepts_plain_address() {
    let email = EmailAddress::new("alice@example.com").expect("valid email");
    assert_eq!(email.to_string(), "alice@example.com");
}

#[rstest]
#[case("", UserValidationError::EmptyRole)]
#[case("  ", UserValidationError::EmptyRole)]
fn role_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Role::new(raw), Err(expected));
}

#[rstest]
fn user_serialises_public_fields_in_camel_case(alice: User) {
    let value = serde_json::to_value(&alice).expect("serialise user");
    assert_eq!(value.get("id"), Some(&json!(1)));
    assert_eq!(value.get("username").and_then(Value::as_str), Some("alice"));
    assert_eq!(value.get("role").and_then(Value::as_str), Some("user"));
    assert!(value.get("createdAt").is_some());
    assert!(value.get("updatedAt").is_some());
    assert!(value.get("passwordHash").is_none());
    assert!(value.get("password_hash").is_none());
}

#[rstest]
fn user_json_round_trips(alice: User) {
    let encoded = serde_json::to_string(&alice).expect("serialise user");
    let decoded: User = serde_json::from_str(&encoded).expect("deserialise user");
    assert_eq!(decoded, alice);
}

#[rstest]
fn user_deserialisation_keeps_stored_values() {
    let payload = json!({
        "id": 2,
        "username": "bob smith",
        "email": "bob@localhost",
        "role": "user",
        "createdAt": "2024-05-01T12:00:00Z",
        "updatedAt": "2024-05-01T12:00:00Z"
    });
    let user: User = serde_json::from_value(payload).expect("stored snapshot decodes");
    assert_eq!(user.username().as_ref(), "bob smith");
    assert_eq!(user.email().as_ref(), "bob@localhost");
}

#[rstest]
fn stored_values_bypass_input_rules() {
    assert!(Username::new("bob smith").is_err());
    assert_eq!(Username::from_stored("bob smith").as_ref(), "bob smith");
}
