//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table; the label is the
//! `name` column.

use serde::{Serialize, Serializer};

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in seed order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the lookup-table name of this status.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Map a database status ID back to the enum.
            pub fn from_id(id: StatusId) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.id() == id)
            }

            /// Parse a status name (as used in query strings).
            pub fn parse(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.as_str() == name)
            }

            /// Comma-separated list of valid names, for error messages.
            pub fn valid_names() -> String {
                Self::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Review status of a quiz or keyword set.
    ContentStatus {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Rejected = 3 => "rejected",
        /// Pulled out of circulation while a correction report is open.
        Reported = 4 => "reported",
    }
}

define_status_enum! {
    /// Review status of a correction report.
    ReportStatus {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Rejected = 3 => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_seed_order() {
        assert_eq!(ContentStatus::Pending.id(), 1);
        assert_eq!(ContentStatus::Approved.id(), 2);
        assert_eq!(ContentStatus::Rejected.id(), 3);
        assert_eq!(ContentStatus::Reported.id(), 4);
        assert_eq!(ReportStatus::Rejected.id(), 3);
    }

    #[test]
    fn from_id_and_parse_agree() {
        for status in ContentStatus::ALL {
            assert_eq!(ContentStatus::from_id(status.id()), Some(*status));
            assert_eq!(ContentStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(ContentStatus::from_id(0), None);
        assert_eq!(ReportStatus::parse("reported"), None);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_value(ContentStatus::Reported).unwrap();
        assert_eq!(json, "reported");
    }

    #[test]
    fn valid_names_lists_all_labels() {
        assert_eq!(
            ContentStatus::valid_names(),
            "pending, approved, rejected, reported"
        );
    }
}
