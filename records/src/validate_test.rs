use super::*;

impl ValidationErrors {
    /// Message for `field`, if it failed.
    pub(crate) fn message_for(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }
}

#[test]
fn email_pattern() {
    assert!(is_email("meera@clinic.in"));
    assert!(is_email("  dr.rao+admin@health.example.com "));
    assert!(!is_email("meera@clinic"));
    assert!(!is_email("meera clinic.in"));
    assert!(!is_email("@clinic.in"));
}

#[test]
fn phone_pattern() {
    assert!(is_phone("9876543210"));
    assert!(!is_phone("98765"));
    assert!(!is_phone("98765-43210"));
    assert!(!is_phone("1234567890123456"));
}

#[test]
fn country_code_pattern() {
    assert!(is_country_code("+91"));
    assert!(is_country_code("+1"));
    assert!(!is_country_code("91"));
    assert!(!is_country_code("+12345"));
}

#[test]
fn validator_collects_every_failure_in_order() {
    let err = Validator::new()
        .required("name", "Name", "  ")
        .email("email", "nope")
        .range("rank", "Rank", 0, 1, 100)
        .finish()
        .unwrap_err();

    let fields: Vec<_> = err.fields().iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "rank"]);
    assert_eq!(err.message_for("rank"), Some("Rank must be between 1 and 100"));
    assert_eq!(err.to_string(), "Name is required (and 2 more)");
}

#[test]
fn validator_passes_clean_input() {
    let result = Validator::new()
        .required("name", "Name", "Meera")
        .phone("phone", "9876543210")
        .country_code("country_code", "+91")
        .finish();
    assert!(result.is_ok());
}

#[test]
fn single_error_displays_its_message() {
    let err = ValidationErrors::single("amount", "Amount must be positive");
    assert_eq!(err.to_string(), "Amount must be positive");
}
