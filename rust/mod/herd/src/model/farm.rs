use cattlecare_core::ValidationError;
use cattlecare_store::{check, Document, Ref};
use serde::{Deserialize, Serialize};

use super::User;

/// A farm and its location. Collection `farms`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    /// Free-form coordinate text, stored as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Ref<User>>,
}

impl Farm {
    pub fn new(name: impl Into<String>, owner: Ref<User>) -> Self {
        Self {
            name: name.into(),
            owner: Some(owner),
            ..Default::default()
        }
    }
}

impl Document for Farm {
    const COLLECTION: &'static str = "farms";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        check::required_str(Self::COLLECTION, "name", &self.name)?;
        check::required_ref(Self::COLLECTION, "owner", &self.owner)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_required() {
        let mut farm = Farm {
            name: "Green Acres".into(),
            ..Default::default()
        };
        assert_eq!(
            farm.clean().unwrap_err(),
            ValidationError::ReferenceUnset { entity: "farms", field: "owner" }
        );

        farm.owner = Some(Ref::new("u1"));
        farm.clean().unwrap();
    }

    #[test]
    fn owner_stored_as_id() {
        let mut farm = Farm::new("Green Acres", Ref::new("u1"));
        farm.county = Some("Nakuru".into());
        let json = serde_json::to_value(&farm).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Green Acres", "county": "Nakuru", "owner": "u1"})
        );
    }
}
