//! "Defaults to now" handling for timestamp fields.
//!
//! The default is applied by `clean` at save time, not when the struct is
//! built, so a record constructed long before it is saved is stamped with
//! the save time.

use chrono::{DateTime, Utc};

/// Set `field` to the current time if it is empty. Returns true if it was filled.
pub fn default_now(field: &mut Option<DateTime<Utc>>) -> bool {
    if field.is_some() {
        return false;
    }
    *field = Some(cattlecare_core::now());
    true
}
