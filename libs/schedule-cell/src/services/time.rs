use chrono::{Duration, NaiveDateTime, Utc};

use shared_models::error::AppError;

/// All schedule timestamps are stored as naive Vietnam local time (UTC+7),
/// matching what the clinic frontend sends and displays.
pub fn vietnam_now() -> NaiveDateTime {
    (Utc::now() + Duration::hours(7)).naive_utc()
}

/// Start of the current day in Vietnam time. Schedules starting from today
/// onwards count as upcoming.
pub fn vietnam_today_start() -> NaiveDateTime {
    vietnam_now()
        .date()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| vietnam_now())
}

/// Validates a schedule time range against the start of `today`.
pub fn validate_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
    today: NaiveDateTime,
) -> Result<(), AppError> {
    if start < today {
        return Err(AppError::ValidationError(
            "Start time must not be in the past".to_string(),
        ));
    }
    if end <= start {
        return Err(AppError::ValidationError(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn valid_range_passes() {
        assert!(validate_range(dt(10, 9), dt(10, 11), dt(10, 0)).is_ok());
    }

    #[test]
    fn past_start_is_rejected() {
        assert_matches!(
            validate_range(dt(9, 9), dt(9, 11), dt(10, 0)),
            Err(AppError::ValidationError(_))
        );
    }

    #[test]
    fn inverted_or_empty_range_is_rejected() {
        assert_matches!(
            validate_range(dt(10, 11), dt(10, 9), dt(10, 0)),
            Err(AppError::ValidationError(_))
        );
        assert_matches!(
            validate_range(dt(10, 9), dt(10, 9), dt(10, 0)),
            Err(AppError::ValidationError(_))
        );
    }

    #[test]
    fn start_of_today_is_still_valid() {
        assert!(validate_range(dt(10, 0), dt(10, 1), dt(10, 0)).is_ok());
    }
}
