use cattlecare_core::ValidationError;
use cattlecare_store::{check, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cow;

/// A breeding event between `cow` and `breeding_partner`. Collection `breeding`.
///
/// The partner is only required to be set; whether it exists is not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Breeding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cow: Option<Ref<Cow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breeding_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breeding_partner: Option<Ref<Cow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Breeding {
    pub fn new(cow: Ref<Cow>, breeding_partner: Ref<Cow>, breeding_date: DateTime<Utc>) -> Self {
        Self {
            cow: Some(cow),
            breeding_date: Some(breeding_date),
            breeding_partner: Some(breeding_partner),
            ..Default::default()
        }
    }
}

impl Document for Breeding {
    const COLLECTION: &'static str = "breeding";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        check::required_ref(Self::COLLECTION, "cow", &self.cow)?;
        check::required(Self::COLLECTION, "breeding_date", &self.breeding_date)?;
        check::required_ref(Self::COLLECTION, "breeding_partner", &self.breeding_partner)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partner_required_even_with_date() {
        let mut b = Breeding::new(Ref::new("c1"), Ref::new("c2"), Utc::now());
        b.breeding_partner = None;
        assert_eq!(
            b.clean().unwrap_err(),
            ValidationError::ReferenceUnset { entity: "breeding", field: "breeding_partner" }
        );
    }

    #[test]
    fn date_required_and_never_defaulted() {
        let mut b = Breeding::new(Ref::new("c1"), Ref::new("c2"), Utc::now());
        b.breeding_date = None;
        assert_eq!(
            b.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "breeding", field: "breeding_date" }
        );
        assert!(b.breeding_date.is_none());
    }

    #[test]
    fn self_partner_is_accepted() {
        let mut b = Breeding::new(Ref::new("c1"), Ref::new("c1"), Utc::now());
        b.clean().unwrap();
    }
}
