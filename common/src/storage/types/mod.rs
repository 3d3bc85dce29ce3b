use serde::{Deserialize, Serialize};
pub mod article;
pub mod article_chunk;
pub mod graph_edge;
pub mod graph_node;
pub mod serde_helpers;

pub trait StoredObject: Serialize + for<'de> Deserialize<'de> {
    fn table_name() -> &'static str;
    fn get_id(&self) -> &str;
}

/// Declares a Surreal-backed record type: string id (tolerant of Thing or
/// plain string on the wire), created/updated timestamps, and the
/// `StoredObject` impl binding it to its table.
#[macro_export]
macro_rules! stored_object {
    ($name:ident, $table:expr, {$($(#[$attr:meta])* $field:ident: $ty:ty),*}) => {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Serialize};
        use $crate::storage::types::StoredObject;

        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
        pub struct $name {
            #[serde(
                deserialize_with = "crate::storage::types::serde_helpers::deserialize_flexible_id"
            )]
            pub id: String,
            #[serde(
                serialize_with = "crate::storage::types::serde_helpers::serialize_datetime",
                deserialize_with = "crate::storage::types::serde_helpers::deserialize_datetime",
                default
            )]
            pub created_at: DateTime<Utc>,
            #[serde(
                serialize_with = "crate::storage::types::serde_helpers::serialize_datetime",
                deserialize_with = "crate::storage::types::serde_helpers::deserialize_datetime",
                default
            )]
            pub updated_at: DateTime<Utc>,
            $( $(#[$attr])* pub $field: $ty),*
        }

        impl StoredObject for $name {
            fn table_name() -> &'static str {
                $table
            }

            fn get_id(&self) -> &str {
                &self.id
            }
        }
    };
}
