use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cow;

/// A feeding. Collection `feeds`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cow: Option<Ref<Cow>>,

    #[serde(default)]
    pub feed_type: String,

    /// Kilograms. Must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeding_time: Option<DateTime<Utc>>,
}

impl Feed {
    pub fn new(cow: Ref<Cow>, feed_type: impl Into<String>, feed_amount: f64) -> Self {
        Self {
            cow: Some(cow),
            feed_type: feed_type.into(),
            feed_amount: Some(feed_amount),
            ..Default::default()
        }
    }
}

impl Document for Feed {
    const COLLECTION: &'static str = "feeds";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        check::required_ref(Self::COLLECTION, "cow", &self.cow)?;
        check::required_str(Self::COLLECTION, "feed_type", &self.feed_type)?;
        check::positive(Self::COLLECTION, "feed_amount", self.feed_amount)?;
        default_now(&mut self.feeding_time);
        Ok(())
    }
}
