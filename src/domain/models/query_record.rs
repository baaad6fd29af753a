use serde::{Deserialize, Serialize};

/// The field values collected for one advice request.
///
/// Built fresh for every submission and dropped once the response has been
/// rendered. All string fields are stored trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    operator_name: String,
    operator_location: String,
    /// Hectares.
    land_size: f64,
    district: String,
    crop_stage: String,
    category: String,
    question: String,
}

impl QueryRecord {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            operator_name: String::new(),
            operator_location: String::new(),
            land_size: 0.0,
            district: String::new(),
            crop_stage: String::new(),
            category: String::new(),
            question: question.into().trim().to_string(),
        }
    }

    pub fn with_operator_name(mut self, name: impl Into<String>) -> Self {
        self.operator_name = name.into().trim().to_string();
        self
    }

    pub fn with_operator_location(mut self, location: impl Into<String>) -> Self {
        self.operator_location = location.into().trim().to_string();
        self
    }

    pub fn with_land_size(mut self, hectares: f64) -> Self {
        // Negative or non-finite sizes are meaningless; fall back to zero
        self.land_size = if hectares.is_finite() && hectares >= 0.0 {
            hectares
        } else {
            0.0
        };
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into().trim().to_string();
        self
    }

    pub fn with_crop_stage(mut self, stage: impl Into<String>) -> Self {
        self.crop_stage = stage.into().trim().to_string();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into().trim().to_string();
        self
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn operator_location(&self) -> &str {
        &self.operator_location
    }

    pub fn land_size(&self) -> f64 {
        self.land_size
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn crop_stage(&self) -> &str {
        &self.crop_stage
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn has_question(&self) -> bool {
        !self.question.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("district=\"{}\"", self.district)];
        if !self.crop_stage.is_empty() {
            parts.push(format!("crop_stage=\"{}\"", self.crop_stage));
        }
        if !self.category.is_empty() {
            parts.push(format!("category=\"{}\"", self.category));
        }
        parts.push(format!("question_len={}", self.question.chars().count()));
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_fields() {
        let record = QueryRecord::new("  How to save fuel during irrigation?  ")
            .with_district(" Samastipur ")
            .with_crop_stage("Vegetative\n");

        assert_eq!(record.question(), "How to save fuel during irrigation?");
        assert_eq!(record.district(), "Samastipur");
        assert_eq!(record.crop_stage(), "Vegetative");
        assert!(record.has_question());
    }

    #[test]
    fn test_blank_question_is_not_a_question() {
        assert!(!QueryRecord::new("   ").has_question());
    }

    #[test]
    fn test_land_size_rejects_negative_and_nan() {
        assert_eq!(QueryRecord::new("q").with_land_size(-1.0).land_size(), 0.0);
        assert_eq!(QueryRecord::new("q").with_land_size(f64::NAN).land_size(), 0.0);
        assert_eq!(QueryRecord::new("q").with_land_size(0.25).land_size(), 0.25);
    }

    #[test]
    fn test_summary_omits_question_text() {
        let record = QueryRecord::new("secret plans").with_district("Patna");
        let summary = record.summary();
        assert!(summary.contains("Patna"));
        assert!(!summary.contains("secret plans"));
    }
}
