//! Strongly-typed identifier value objects.
//!
//! Every entity id is a UUID newtype so a club id cannot be passed where a
//! wallet id is expected. The `define_id!` macro generates the shared
//! boilerplate (constructors, `Display`, `FromStr`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user profile.
    UserId
);

define_id!(
    /// Unique identifier for a login session row.
    SessionId
);

define_id!(
    /// Unique identifier for a sport.
    SportId
);

define_id!(
    /// Unique identifier for a club.
    ClubId
);

define_id!(
    /// Unique identifier for a club membership row.
    MembershipId
);

define_id!(
    /// Unique identifier for a training session.
    TrainingId
);

define_id!(
    /// Unique identifier for an attendance row.
    AttendanceId
);

define_id!(
    /// Unique identifier for a student wallet.
    WalletId
);

define_id!(
    /// Unique identifier for a wallet transaction.
    TransactionId
);

define_id!(
    /// Unique identifier for a club join request.
    JoinRequestId
);

define_id!(
    /// Unique identifier for a notification.
    NotificationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(ClubId::new(), ClubId::new());
    }

    #[test]
    fn id_round_trips_through_display_and_from_str() {
        let id = WalletId::new();
        let parsed: WalletId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_invalid_uuid() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn id_serializes_as_plain_uuid_string() {
        let id = SportId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
