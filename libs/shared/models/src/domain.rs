use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Account roles. Ids match the seeded `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin = 1,
    Doctor = 2,
    Supporter = 3,
}

impl Role {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Doctor),
            3 => Some(Role::Supporter),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Supporter => "supporter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
}

/// Booking lifecycle. Supporters resolve pending bookings; doctors close
/// accepted ones by issuing the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status")]
pub enum BookingStatus {
    Pending,
    Accept,
    Reject,
    Done,
}

impl BookingStatus {
    /// Transition table for the booking state machine. Supporters may resolve
    /// a pending booking either way; a doctor moves an accepted booking to
    /// Done when the bill goes out. Everything else is refused.
    pub fn can_transition_to(self, next: BookingStatus, actor: Role) -> bool {
        match (self, next, actor) {
            (BookingStatus::Pending, BookingStatus::Accept, Role::Supporter) => true,
            (BookingStatus::Pending, BookingStatus::Reject, Role::Supporter) => true,
            (BookingStatus::Accept, BookingStatus::Done, Role::Doctor) => true,
            _ => false,
        }
    }

    /// Outcome check for a compare-and-set status UPDATE whose WHERE clause
    /// re-asserts the status this request observed. Zero affected rows means
    /// another request moved the booking first.
    pub fn ensure_updated(self, rows_affected: u64, next: BookingStatus) -> Result<(), AppError> {
        if rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Booking left {} before the change to {} was applied",
                self.as_str(),
                next.as_str()
            )));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Accept => "Accept",
            BookingStatus::Reject => "Reject",
            BookingStatus::Done => "Done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_round_trip() {
        assert_eq!(Role::from_id(1), Some(Role::Admin));
        assert_eq!(Role::from_id(2), Some(Role::Doctor));
        assert_eq!(Role::from_id(3), Some(Role::Supporter));
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(4), None);
    }

    #[test]
    fn supporter_resolves_pending_bookings() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Accept, Role::Supporter));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Reject, Role::Supporter));
    }

    #[test]
    fn doctor_closes_accepted_bookings() {
        assert!(BookingStatus::Accept.can_transition_to(BookingStatus::Done, Role::Doctor));
    }

    #[test]
    fn everything_else_is_refused() {
        // Wrong actor
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Accept, Role::Admin));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Accept, Role::Doctor));
        assert!(!BookingStatus::Accept.can_transition_to(BookingStatus::Done, Role::Supporter));

        // Wrong edge
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Done, Role::Supporter));
        assert!(!BookingStatus::Reject.can_transition_to(BookingStatus::Accept, Role::Supporter));
        assert!(!BookingStatus::Done.can_transition_to(BookingStatus::Pending, Role::Supporter));
        assert!(!BookingStatus::Accept.can_transition_to(BookingStatus::Reject, Role::Supporter));
    }

    #[test]
    fn applied_status_change_passes() {
        assert!(BookingStatus::Pending.ensure_updated(1, BookingStatus::Accept).is_ok());
    }

    #[test]
    fn concurrent_status_change_is_a_conflict() {
        // The booking was resolved by another request between the read and
        // the guarded UPDATE, so the UPDATE matched nothing.
        let err = BookingStatus::Pending
            .ensure_updated(0, BookingStatus::Reject)
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
