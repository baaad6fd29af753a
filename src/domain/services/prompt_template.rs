use crate::domain::QueryRecord;

const NOT_SPECIFIED: &str = "not specified";

/// The fixed instruction block appended to every prompt.
const INSTRUCTIONS: &str = "\
Instructions: Provide a formatted response with:
1. A bulleted list of actionable steps.
2. A brief 'Why' (justification) for each suggestion to build trust.
3. Simple, non-technical language for a layperson.";

/// Builds the natural-language prompt for one [`QueryRecord`].
///
/// Every record field is substituted; blank fields read as "not specified" so
/// the model never sees a dangling label.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    persona: String,
}

impl PromptTemplate {
    pub fn new() -> Self {
        Self {
            persona: "You are an expert Bihar agricultural consultant.".to_string(),
        }
    }

    pub fn build(&self, record: &QueryRecord) -> String {
        format!(
            "{persona}\n\
             User Profile: {name} from {location} with {land} hectares.\n\
             Current Query Context: District {district}, Crop Stage {stage}, Help Needed With {category}.\n\
             Question: {question}\n\
             \n\
             {INSTRUCTIONS}\n",
            persona = self.persona,
            name = or_unspecified(record.operator_name()),
            location = or_unspecified(record.operator_location()),
            land = record.land_size(),
            district = or_unspecified(record.district()),
            stage = or_unspecified(record.crop_stage()),
            category = or_unspecified(record.category()),
            question = record.question(),
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new()
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> QueryRecord {
        QueryRecord::new("How to save fuel during irrigation?")
            .with_operator_name("Ram Kumar Baitha")
            .with_operator_location("Kishanganj, Bihar")
            .with_land_size(0.25)
            .with_district("Samastipur")
            .with_crop_stage("Vegetative")
            .with_category("Diesel Cost Saving")
    }

    #[test]
    fn test_every_field_is_substituted() {
        let prompt = PromptTemplate::new().build(&sample_record());

        assert!(prompt.contains("Ram Kumar Baitha from Kishanganj, Bihar with 0.25 hectares"));
        assert!(prompt.contains("District Samastipur"));
        assert!(prompt.contains("Crop Stage Vegetative"));
        assert!(prompt.contains("Help Needed With Diesel Cost Saving"));
        assert!(prompt.contains("Question: How to save fuel during irrigation?"));
    }

    #[test]
    fn test_instructions_are_present() {
        let prompt = PromptTemplate::new().build(&sample_record());
        assert!(prompt.contains("bulleted list of actionable steps"));
        assert!(prompt.contains("'Why'"));
        assert!(prompt.contains("non-technical language"));
    }

    #[test]
    fn test_blank_fields_read_as_not_specified() {
        let prompt = PromptTemplate::new().build(&QueryRecord::new("When to sow maize?"));
        assert!(prompt.contains("User Profile: not specified from not specified with 0 hectares."));
        assert!(prompt.contains("District not specified"));
    }

    #[test]
    fn test_starts_with_persona() {
        let prompt = PromptTemplate::new().build(&sample_record());
        assert!(prompt.starts_with("You are an expert Bihar agricultural consultant.\n"));
    }

    #[test]
    fn test_land_size_is_not_rounded() {
        for (hectares, expected) in [
            (0.004, "with 0.004 hectares."),
            (0.125, "with 0.125 hectares."),
            (1234.567, "with 1234.567 hectares."),
            (2.0, "with 2 hectares."),
        ] {
            let record = QueryRecord::new("q").with_land_size(hectares);
            let prompt = PromptTemplate::new().build(&record);
            assert!(prompt.contains(expected), "{hectares} rendered as {prompt:?}");
        }
    }
}
