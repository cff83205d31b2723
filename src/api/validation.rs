use super::ApiError;
use crate::constants::limits::DEFAULT_HISTORY_LIMIT;

pub fn validate_case_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid case ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

/// Applies the default when absent and rejects out-of-range values.
pub fn validate_limit(limit: Option<u64>) -> Result<u64, ApiError> {
    const MAX_LIMIT: u64 = 500;
    const MIN_LIMIT: u64 = 1;

    let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            limit, MIN_LIMIT, MAX_LIMIT
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_case_id() {
        assert!(validate_case_id(1).is_ok());
        assert!(validate_case_id(0).is_err());
        assert!(validate_case_id(-4).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(validate_limit(Some(500)).unwrap(), 500);
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(501)).is_err());
    }
}
