//! Document layer over a key-value backend.
//!
//! Entities implement [`Document`] to declare their collection and their
//! pre-save `clean` hook. CRUD is provided by [`DocOps`]; links between
//! documents are typed [`Ref`]s resolved with an explicit lookup.
//!
//! ```ignore
//! impl Document for Farm {
//!     const COLLECTION: &'static str = "farms";
//!     fn clean(&mut self) -> Result<(), ValidationError> {
//!         check::required_ref(Self::COLLECTION, "owner", &self.owner)?;
//!         Ok(())
//!     }
//! }
//! ```

pub mod check;
pub mod database;
pub mod doc;
pub mod reference;
pub mod timestamp;

pub use database::Database;
pub use doc::{DocOps, Document};
pub use reference::Ref;
pub use timestamp::default_now;
