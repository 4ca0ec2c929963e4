use crate::errors::ApiError;

/// Usernames are matched case-insensitively, so store them lowercased.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let length = username.chars().count();
    if length < 3 || length > 30 {
        return Err(ApiError::Validation(
            "Username must be between 3 and 30 characters".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ApiError::Validation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Query-string limits arrive as text. Anything unparsable or non-positive
/// falls back to the given default.
pub fn parse_limit(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(default)
}

pub fn optional_non_negative(value: Option<i64>) -> Result<Option<i64>, ApiError> {
    match value {
        Some(count) if count < 0 => Err(ApiError::Validation("Invalid value".to_string())),
        other => Ok(other),
    }
}
