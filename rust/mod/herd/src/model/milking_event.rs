use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cow, Farm};

string_enum! {
    MilkingMethod, "milking_method" {
        Manual => "manual",
        Machine => "machine",
    }
}

/// One milking session. Collection `milking_events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MilkingEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cow: Option<Ref<Cow>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milking_time: Option<DateTime<Utc>>,

    /// Litres. Must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milk_quantity: Option<f64>,

    /// Who milked the cow.
    #[serde(default)]
    pub milker: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milking_method: Option<MilkingMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Not checked against the cow's own farm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<Ref<Farm>>,
}

impl MilkingEvent {
    pub fn new(
        cow: Ref<Cow>,
        farm: Ref<Farm>,
        milk_quantity: f64,
        milker: impl Into<String>,
        milking_method: MilkingMethod,
    ) -> Self {
        Self {
            cow: Some(cow),
            farm_id: Some(farm),
            milk_quantity: Some(milk_quantity),
            milker: milker.into(),
            milking_method: Some(milking_method),
            ..Default::default()
        }
    }
}

impl Document for MilkingEvent {
    const COLLECTION: &'static str = "milking_events";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        let entity = Self::COLLECTION;
        check::required_ref(entity, "cow", &self.cow)?;
        check::required_ref(entity, "farm_id", &self.farm_id)?;
        check::positive(entity, "milk_quantity", self.milk_quantity)?;
        check::required_str(entity, "milker", &self.milker)?;
        check::required(entity, "milking_method", &self.milking_method)?;
        default_now(&mut self.milking_time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(quantity: f64) -> MilkingEvent {
        MilkingEvent::new(Ref::new("c1"), Ref::new("f1"), quantity, "John Doe", MilkingMethod::Machine)
    }

    #[test]
    fn quantity_must_be_positive() {
        let mut zero = event(0.0);
        assert_eq!(
            zero.clean().unwrap_err(),
            ValidationError::InvalidNumericRange {
                entity: "milking_events",
                field: "milk_quantity",
                value: 0.0
            }
        );

        let mut ok = event(10.5);
        ok.clean().unwrap();
        assert_eq!(ok.milk_quantity, Some(10.5));
        assert!(ok.milking_time.is_some());
    }

    #[test]
    fn method_required() {
        let mut e = event(3.0);
        e.milking_method = None;
        assert_eq!(
            e.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "milking_events", field: "milking_method" }
        );
    }

    #[test]
    fn farm_required() {
        let mut e = event(3.0);
        e.farm_id = None;
        assert_eq!(
            e.clean().unwrap_err(),
            ValidationError::ReferenceUnset { entity: "milking_events", field: "farm_id" }
        );
    }

    #[test]
    fn method_wire_names() {
        let e = event(2.0);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["milking_method"], "machine");
        assert_eq!(json["farm_id"], "f1");
        assert_eq!("manual".parse::<MilkingMethod>().unwrap(), MilkingMethod::Manual);
        assert!("robot".parse::<MilkingMethod>().is_err());
    }
}
