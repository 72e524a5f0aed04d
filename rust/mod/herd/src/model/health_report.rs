use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cow;

/// Result of a health checkup. Collection `health_reports`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cow: Option<Ref<Cow>>,

    #[serde(default)]
    pub report_details: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl HealthReport {
    pub fn new(cow: Ref<Cow>, report_details: impl Into<String>) -> Self {
        Self {
            cow: Some(cow),
            report_details: report_details.into(),
            ..Default::default()
        }
    }
}

impl Document for HealthReport {
    const COLLECTION: &'static str = "health_reports";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        check::required_ref(Self::COLLECTION, "cow", &self.cow)?;
        check::required_str(Self::COLLECTION, "report_details", &self.report_details)?;
        default_now(&mut self.report_date);
        Ok(())
    }
}
