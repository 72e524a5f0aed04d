//! Typed references between documents.
//!
//! A `Ref<T>` is the id of a `T` stored in `T::COLLECTION`. On disk it is
//! just the id string; the target type only exists at compile time.
//! Resolving a reference is an explicit lookup, see [`crate::DocOps::resolve`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Document;

pub struct Ref<T> {
    id: String,
    _target: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _target: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_id(self) -> String {
        self.id
    }
}

impl<T: Document> Ref<T> {
    /// Reference to a saved document. None if it has not been saved yet.
    pub fn of(doc: &T) -> Option<Self> {
        doc.id().map(Self::new)
    }

    /// Whether this reference points at `doc`.
    pub fn points_to(&self, doc: &T) -> bool {
        doc.id() == Some(self.id.as_str())
    }
}

// Manual impls: derives would put bounds on T.

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({})", self.id)
    }
}

impl<T> fmt::Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl<T> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de, T> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cattlecare_core::ValidationError;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Barn {
        id: Option<String>,
    }

    impl Document for Barn {
        const COLLECTION: &'static str = "barns";

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }

        fn clean(&mut self) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn serializes_as_plain_id() {
        let r: Ref<Barn> = Ref::new("abc123");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"abc123\"");
        let back: Ref<Barn> = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn of_requires_saved_document() {
        let unsaved = Barn { id: None };
        assert!(Ref::of(&unsaved).is_none());

        let saved = Barn { id: Some("b1".into()) };
        let r = Ref::of(&saved).unwrap();
        assert_eq!(r.id(), "b1");
        assert!(r.points_to(&saved));
        assert!(!r.points_to(&unsaved));
    }
}
