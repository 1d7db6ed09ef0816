//! Payload validation.
//!
//! One pure check function per operation shape. Each function inspects the
//! deserialized payload, stops at the first violated constraint and reports it
//! as `AppError::Validation` with a message naming the field. Nothing in here
//! touches the store.

use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::{LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::models::task::parse_due_date;
use crate::models::{ChangePasswordRequest, ProfileUpdateRequest, TaskPayload, TaskPriority};

lazy_static! {
    // Deliberately loose: "something@something.tld" is enough here, the
    // address is never used for delivery.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

/// Whether a task payload is validated for creation or for a partial update.
/// `title` is required only on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    Create,
    Update,
}

fn fail(message: impl Into<String>) -> Result<(), AppError> {
    Err(AppError::Validation(message.into()))
}

fn check_email(email: &Option<String>) -> Result<(), AppError> {
    match email {
        None => fail("Email is required"),
        Some(value) if !EMAIL_REGEX.is_match(value.trim()) => {
            fail("Email must be a valid email address")
        }
        Some(_) => Ok(()),
    }
}

fn check_password(password: &Option<String>, label: &str) -> Result<(), AppError> {
    match password {
        None => fail(format!("{} is required", label)),
        Some(value) if value.chars().count() < 6 => {
            fail(format!("{} must be at least 6 characters", label))
        }
        Some(_) => Ok(()),
    }
}

// Handlers persist the trimmed name, so the bounds apply to the trimmed
// value too.
fn check_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().chars().count();
    if !(3..=50).contains(&len) {
        return fail("Name must be between 3 and 50 characters");
    }
    Ok(())
}

pub fn validate_signup(payload: &SignupRequest) -> Result<(), AppError> {
    check_email(&payload.email)?;
    check_password(&payload.password, "Password")?;
    if let Some(name) = &payload.name {
        check_name(name)?;
    }
    Ok(())
}

pub fn validate_login(payload: &LoginRequest) -> Result<(), AppError> {
    check_email(&payload.email)?;
    check_password(&payload.password, "Password")?;
    Ok(())
}

pub fn validate_task(payload: &TaskPayload, mode: TaskMode) -> Result<(), AppError> {
    match (&payload.title, mode) {
        (None, TaskMode::Create) => return fail("Title is required"),
        (Some(title), _) => {
            let len = title.trim().chars().count();
            if !(3..=100).contains(&len) {
                return fail("Title must be between 3 and 100 characters");
            }
        }
        (None, TaskMode::Update) => {}
    }

    if let Some(description) = &payload.description {
        if description.chars().count() > 500 {
            return fail("Description must be at most 500 characters");
        }
    }

    if let Some(due_date) = &payload.due_date {
        if parse_due_date(due_date).is_none() {
            return fail("Due Date must be a valid date");
        }
    }

    if let Some(priority) = &payload.priority {
        if priority.parse::<TaskPriority>().is_err() {
            return fail("Priority must be one of low, medium, high");
        }
    }

    // `completed` is already a bool at this point; a non-boolean value is
    // rejected during deserialization.
    Ok(())
}

pub fn validate_profile_update(payload: &ProfileUpdateRequest) -> Result<(), AppError> {
    if let Some(name) = &payload.name {
        check_name(name)?;
    }
    if let Some(bio) = &payload.bio {
        if bio.chars().count() > 200 {
            return fail("Bio must be at most 200 characters");
        }
    }
    Ok(())
}

pub fn validate_password_change(payload: &ChangePasswordRequest) -> Result<(), AppError> {
    check_password(&payload.current_password, "Current Password")?;
    check_password(&payload.new_password, "New Password")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: Option<&str>, password: Option<&str>, name: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.map(String::from),
            password: password.map(String::from),
            name: name.map(String::from),
        }
    }

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_signup_accepts_valid_payload() {
        assert!(validate_signup(&signup(
            Some("alice@example.com"),
            Some("password123"),
            None
        ))
        .is_ok());
        assert!(validate_signup(&signup(
            Some("alice@example.com"),
            Some("password123"),
            Some("Alice")
        ))
        .is_ok());
    }

    #[test]
    fn test_signup_rejects_bad_email() {
        assert_eq!(
            message(validate_signup(&signup(None, Some("password123"), None))),
            "Email is required"
        );
        assert_eq!(
            message(validate_signup(&signup(
                Some("not-an-email"),
                Some("password123"),
                None
            ))),
            "Email must be a valid email address"
        );
        assert_eq!(
            message(validate_signup(&signup(
                Some("white space@example.com"),
                Some("password123"),
                None
            ))),
            "Email must be a valid email address"
        );
    }

    #[test]
    fn test_signup_rejects_short_password_and_bad_name() {
        assert_eq!(
            message(validate_signup(&signup(
                Some("alice@example.com"),
                Some("12345"),
                None
            ))),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            message(validate_signup(&signup(
                Some("alice@example.com"),
                Some("password123"),
                Some("ab")
            ))),
            "Name must be between 3 and 50 characters"
        );
        let long_name = "a".repeat(51);
        assert_eq!(
            message(validate_signup(&signup(
                Some("alice@example.com"),
                Some("password123"),
                Some(&long_name)
            ))),
            "Name must be between 3 and 50 characters"
        );
    }

    #[test]
    fn test_name_bounds_apply_to_trimmed_value() {
        // Whitespace padding must not smuggle sub-minimum names past the
        // check; the stored value is the trimmed one.
        for padded in ["   ", " ab ", "\t\n"] {
            assert_eq!(
                message(validate_signup(&signup(
                    Some("alice@example.com"),
                    Some("password123"),
                    Some(padded)
                ))),
                "Name must be between 3 and 50 characters"
            );
            assert_eq!(
                message(validate_profile_update(&ProfileUpdateRequest {
                    name: Some(padded.to_string()),
                    bio: None,
                })),
                "Name must be between 3 and 50 characters"
            );
        }

        // Padding around a valid name stays valid.
        assert!(validate_profile_update(&ProfileUpdateRequest {
            name: Some("  Alice  ".to_string()),
            bio: None,
        })
        .is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        // Both email and password invalid: the email message is reported.
        assert_eq!(
            message(validate_signup(&signup(Some("nope"), Some("123"), None))),
            "Email must be a valid email address"
        );
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: Some("alice@example.com".into()),
            password: Some("password123".into()),
        };
        assert!(validate_login(&ok).is_ok());

        let missing_password = LoginRequest {
            email: Some("alice@example.com".into()),
            password: None,
        };
        assert_eq!(
            message(validate_login(&missing_password)),
            "Password is required"
        );
    }

    #[test]
    fn test_task_title_required_on_create_only() {
        let empty = TaskPayload::default();
        assert_eq!(
            message(validate_task(&empty, TaskMode::Create)),
            "Title is required"
        );
        assert!(validate_task(&empty, TaskMode::Update).is_ok());
    }

    #[test]
    fn test_task_field_constraints() {
        let short_title = TaskPayload {
            title: Some("ab".into()),
            ..Default::default()
        };
        assert_eq!(
            message(validate_task(&short_title, TaskMode::Create)),
            "Title must be between 3 and 100 characters"
        );

        let long_description = TaskPayload {
            title: Some("Valid title".into()),
            description: Some("d".repeat(501)),
            ..Default::default()
        };
        assert_eq!(
            message(validate_task(&long_description, TaskMode::Create)),
            "Description must be at most 500 characters"
        );

        let bad_date = TaskPayload {
            title: Some("Valid title".into()),
            due_date: Some("soonish".into()),
            ..Default::default()
        };
        assert_eq!(
            message(validate_task(&bad_date, TaskMode::Create)),
            "Due Date must be a valid date"
        );

        let bad_priority = TaskPayload {
            title: Some("Valid title".into()),
            priority: Some("urgent".into()),
            ..Default::default()
        };
        assert_eq!(
            message(validate_task(&bad_priority, TaskMode::Create)),
            "Priority must be one of low, medium, high"
        );
    }

    #[test]
    fn test_task_update_checks_supplied_fields() {
        // Partial update with only a bad priority still fails on that field.
        let payload = TaskPayload {
            priority: Some("urgent".into()),
            ..Default::default()
        };
        assert_eq!(
            message(validate_task(&payload, TaskMode::Update)),
            "Priority must be one of low, medium, high"
        );

        let completed_only = TaskPayload {
            completed: Some(true),
            ..Default::default()
        };
        assert!(validate_task(&completed_only, TaskMode::Update).is_ok());
    }

    #[test]
    fn test_profile_update_validation() {
        let ok = ProfileUpdateRequest {
            name: Some("Alice".into()),
            bio: Some(String::new()),
        };
        assert!(validate_profile_update(&ok).is_ok());

        let long_bio = ProfileUpdateRequest {
            name: None,
            bio: Some("b".repeat(201)),
        };
        assert_eq!(
            message(validate_profile_update(&long_bio)),
            "Bio must be at most 200 characters"
        );
    }

    #[test]
    fn test_password_change_validation() {
        let ok = ChangePasswordRequest {
            current_password: Some("oldpassword".into()),
            new_password: Some("newpassword".into()),
        };
        assert!(validate_password_change(&ok).is_ok());

        let short_new = ChangePasswordRequest {
            current_password: Some("oldpassword".into()),
            new_password: Some("12345".into()),
        };
        assert_eq!(
            message(validate_password_change(&short_new)),
            "New Password must be at least 6 characters"
        );
    }
}
