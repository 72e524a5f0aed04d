use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Breeding, Farm, Feed, HealthReport, MilkingEvent, User};

string_enum! {
    /// Life stage. A cow may carry several at once.
    Maturity, "maturity" {
        Calf => "calf",
        Mature => "mature",
    }
}

string_enum! {
    PregnancyStatus, "pregnancy_status" {
        NotPregnant => "not_pregnant",
        Pregnant => "pregnant",
        CalfBearing => "calf_bearing",
    }
}

string_enum! {
    HealthStatus, "health_status" {
        Healthy => "healthy",
        Sick => "sick",
        UnderObservation => "under_observation",
    }
}

/// Opaque handle to a stored cow photo. Storage and retrieval happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A cow with its health, production, feed and breeding history.
/// Collection `cows`.
///
/// The history vectors hold references only; saving a report does not
/// append to them and deleting the cow does not remove the reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    /// At least one stage is required.
    #[serde(default)]
    pub maturity: Vec<Maturity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_status: Option<PregnancyStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,

    #[serde(default)]
    pub is_pregnant: bool,

    /// `healthy` when absent at save time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub cow_images: Vec<ImageHandle>,

    #[serde(default)]
    pub health_reports: Vec<Ref<HealthReport>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Ref<User>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<Ref<Farm>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_vaccination: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checkup: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_checkup: Option<DateTime<Utc>>,

    /// Total milk produced, in litres.
    #[serde(default)]
    pub milk_production: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default)]
    pub feed_data: Vec<Ref<Feed>>,

    #[serde(default)]
    pub breeding_history: Vec<Ref<Breeding>>,

    #[serde(default)]
    pub milking_history: Vec<Ref<MilkingEvent>>,
}

impl Cow {
    pub fn new(name: impl Into<String>, maturity: Vec<Maturity>) -> Self {
        Self {
            name: name.into(),
            maturity,
            ..Default::default()
        }
    }

    /// Health status with the save-time default applied.
    pub fn health(&self) -> HealthStatus {
        self.health_status.unwrap_or(HealthStatus::Healthy)
    }
}

impl Document for Cow {
    const COLLECTION: &'static str = "cows";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        check::required_str(Self::COLLECTION, "name", &self.name)?;
        check::non_empty(Self::COLLECTION, "maturity", &self.maturity)?;
        if self.health_status.is_none() {
            self.health_status = Some(HealthStatus::Healthy);
        }
        default_now(&mut self.last_vaccination);
        default_now(&mut self.last_checkup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clean_applies_defaults() {
        let mut cow = Cow::new("Bessie", vec![Maturity::Calf]);
        assert_eq!(cow.milk_production, 0.0);
        assert!(!cow.is_pregnant);

        cow.clean().unwrap();
        assert_eq!(cow.health_status, Some(HealthStatus::Healthy));
        assert!(cow.last_vaccination.is_some());
        assert!(cow.last_checkup.is_some());
        assert!(cow.next_due_checkup.is_none());
    }

    #[test]
    fn clean_keeps_populated_fields() {
        let checkup = Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
        let mut cow = Cow::new("Daisy", vec![Maturity::Calf, Maturity::Mature]);
        cow.health_status = Some(HealthStatus::UnderObservation);
        cow.last_checkup = Some(checkup);

        cow.clean().unwrap();
        let once = cow.clone();
        cow.clean().unwrap();

        assert_eq!(cow, once);
        assert_eq!(cow.health(), HealthStatus::UnderObservation);
        assert_eq!(cow.last_checkup, Some(checkup));
    }

    #[test]
    fn name_and_maturity_required() {
        let mut nameless = Cow::new("", vec![Maturity::Calf]);
        assert_eq!(
            nameless.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "cows", field: "name" }
        );
        // Nothing was defaulted on the failed attempt.
        assert!(nameless.health_status.is_none());

        let mut no_stage = Cow::new("Bessie", vec![]);
        assert_eq!(
            no_stage.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "cows", field: "maturity" }
        );
    }

    #[test]
    fn deserializes_sparse_document() {
        let cow: Cow = serde_json::from_str(
            r#"{"name":"Bessie","maturity":["calf","mature"],"pregnancy_status":"calf_bearing","farm_id":"f1"}"#,
        )
        .unwrap();
        assert_eq!(cow.maturity, vec![Maturity::Calf, Maturity::Mature]);
        assert_eq!(cow.pregnancy_status, Some(PregnancyStatus::CalfBearing));
        assert_eq!(cow.farm_id.as_ref().map(|r| r.id()), Some("f1"));
        assert!(cow.health_reports.is_empty());

        let err = serde_json::from_str::<Cow>(r#"{"name":"B","maturity":["heifer"]}"#).unwrap_err();
        assert!(err.to_string().contains("'heifer' is not a valid maturity"));
    }
}
