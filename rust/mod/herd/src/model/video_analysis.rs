use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document, Ref};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cow;

/// Output of an external video analysis run. Collection `video_analyses`.
///
/// `analysis_results` and `recommendation` are written by the analysis
/// producer and stored as opaque text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cow: Option<Ref<Cow>>,

    /// Location of the uploaded video.
    #[serde(default)]
    pub video_url: String,

    #[serde(default)]
    pub analysis_results: String,

    #[serde(default)]
    pub recommendation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_time: Option<DateTime<Utc>>,
}

impl VideoAnalysis {
    pub fn new(
        cow: Ref<Cow>,
        video_url: impl Into<String>,
        analysis_results: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            cow: Some(cow),
            video_url: video_url.into(),
            analysis_results: analysis_results.into(),
            recommendation: recommendation.into(),
            ..Default::default()
        }
    }
}

impl Document for VideoAnalysis {
    const COLLECTION: &'static str = "video_analyses";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        let entity = Self::COLLECTION;
        check::required_ref(entity, "cow", &self.cow)?;
        check::required_str(entity, "video_url", &self.video_url)?;
        check::required_str(entity, "analysis_results", &self.analysis_results)?;
        check::required_str(entity, "recommendation", &self.recommendation)?;
        default_now(&mut self.analysis_time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_and_recommendation_required() {
        let mut v = VideoAnalysis::new(Ref::new("c1"), "http://example.com/video.mp4", "", "Healthy cow");
        assert_eq!(
            v.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "video_analyses", field: "analysis_results" }
        );

        v.analysis_results = "No diseases detected".into();
        v.recommendation.clear();
        assert_eq!(
            v.clean().unwrap_err(),
            ValidationError::MissingRequiredField { entity: "video_analyses", field: "recommendation" }
        );

        v.recommendation = "Healthy cow".into();
        v.clean().unwrap();
        assert!(v.analysis_time.is_some());
    }
}
