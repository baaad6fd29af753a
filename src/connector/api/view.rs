//! Server-side rendering of the advice page.
//!
//! The page is a single handlebars template: a sidebar with the farmer
//! profile and the API key field, a main panel with the query fields, and an
//! output panel that shows the outcome of the last submission (if any).
//! Every `{{value}}` is HTML-escaped by handlebars.

use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::{
    AdviceOutcome, DomainError, FormInput, CATEGORY_SUGGESTIONS, CROP_STAGE_SUGGESTIONS,
    DISTRICT_SUGGESTIONS, MISSING_KEY_MESSAGE,
};

pub const PAGE_TITLE: &str = "BiharKrishi AI: Smart Farming Assistant";
pub const PAGE_SUBTITLE: &str = "Solving Bihar's Flood-Drought Paradox with Generative AI";
pub const RECOMMENDATIONS_HEADING: &str = "Expert Recommendations";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;display:flex;min-height:100vh;color:#1b2b1b}
aside{width:18rem;background:#eef5e9;padding:1.5rem}
main{flex:1;padding:1.5rem 2.5rem;max-width:56rem}
label{display:block;margin:.75rem 0 .25rem;font-weight:600}
input,textarea{width:100%;box-sizing:border-box;padding:.5rem;border:1px solid #b7c9b0;border-radius:4px}
.columns{display:flex;gap:1.5rem}.columns>div{flex:1}
button{margin-top:1rem;padding:.6rem 1.4rem;background:#2e7d32;color:#fff;border:0;border-radius:4px}
.banner{padding:.75rem 1rem;border-radius:4px;margin:1rem 0}
.warning{background:#fff4ce}.error{background:#fde2e1}
.advice{white-space:pre-wrap;background:#f6faf4;padding:1rem;border-radius:4px}";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>{{{style}}}</style>
</head>
<body>
<form method="post" action="/advice" style="display:contents">
<aside>
<h2>User Profile</h2>
<label for="farmer_name">Farmer Name:</label>
<input id="farmer_name" name="farmer_name" type="text" value="{{form.farmer_name}}">
<label for="farmer_location">Home Location:</label>
<input id="farmer_location" name="farmer_location" type="text" value="{{form.farmer_location}}">
<label for="land_size">Land Size (Hectares):</label>
<input id="land_size" name="land_size" type="text" value="{{form.land_size}}">
<hr>
{{#if key_configured}}
<p>Gemini API key loaded from configuration.</p>
{{else}}
<label for="api_key">Enter Gemini API Key</label>
<input id="api_key" name="api_key" type="password" autocomplete="off">
{{/if}}
</aside>
<main>
<h1>{{title}}</h1>
<h3>{{subtitle}}</h3>
{{#if notice}}
<div class="banner {{notice.class}}" role="alert">{{notice.message}}</div>
{{/if}}
<div class="columns">
<div>
<label for="district">Select your District:</label>
<input id="district" name="district" type="text" value="{{form.district}}" list="districts">
<label for="crop_stage">Current Crop Stage:</label>
<input id="crop_stage" name="crop_stage" type="text" value="{{form.crop_stage}}" list="crop-stages">
</div>
<div>
<label for="category">What do you need help with?</label>
<input id="category" name="category" type="text" value="{{form.category}}" list="categories">
</div>
</div>
<label for="question">Enter your specific farming question:</label>
<input id="question" name="question" type="text" value="{{form.question}}">
<button type="submit">Get AI Advice</button>
{{#if recommendations}}
<section id="output">
<h3>{{heading}}</h3>
<div class="advice">{{recommendations}}</div>
</section>
{{/if}}
{{#if banner}}
<div class="banner {{banner.class}}" role="alert">{{banner.message}}</div>
{{/if}}
</main>
</form>
<datalist id="districts">{{#each districts}}<option value="{{this}}">{{/each}}</datalist>
<datalist id="crop-stages">{{#each crop_stages}}<option value="{{this}}">{{/each}}</datalist>
<datalist id="categories">{{#each categories}}<option value="{{this}}">{{/each}}</datalist>
</body>
</html>
"#;

/// Everything needed to render the page once.
#[derive(Debug, Clone)]
pub struct PageModel {
    /// Field values to prefill; never carries the credential.
    pub form: FormInput,
    pub key_configured: bool,
    pub outcome: Option<AdviceOutcome>,
}

impl PageModel {
    pub fn new(form: &FormInput, key_configured: bool) -> Self {
        Self {
            form: form.without_api_key(),
            key_configured,
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: AdviceOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

#[derive(Debug, Serialize)]
struct Banner {
    class: &'static str,
    message: String,
}

impl Banner {
    fn warning(message: &str) -> Self {
        Self {
            class: "warning",
            message: message.to_string(),
        }
    }

    fn error(prefix: &str, message: &str) -> Self {
        Self {
            class: "error",
            message: format!("{prefix}: {message}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'static str,
    subtitle: &'static str,
    style: &'static str,
    heading: &'static str,
    form: &'a FormInput,
    key_configured: bool,
    notice: Option<Banner>,
    recommendations: Option<&'a str>,
    banner: Option<Banner>,
    districts: &'static [&'static str],
    crop_stages: &'static [&'static str],
    categories: &'static [&'static str],
}

impl<'a> PageContext<'a> {
    fn from_model(model: &'a PageModel) -> Self {
        // Without a key the page is unusable, so say so before any submit.
        let notice = (!model.key_configured && model.outcome.is_none())
            .then(|| Banner::error("Configuration Error", MISSING_KEY_MESSAGE));

        let (recommendations, banner) = match &model.outcome {
            None => (None, None),
            Some(AdviceOutcome::Recommendations { text }) => (Some(text.as_str()), None),
            Some(outcome) => (None, outcome_banner(outcome)),
        };

        Self {
            title: PAGE_TITLE,
            subtitle: PAGE_SUBTITLE,
            style: STYLE,
            heading: RECOMMENDATIONS_HEADING,
            form: &model.form,
            key_configured: model.key_configured,
            notice,
            recommendations,
            banner,
            districts: DISTRICT_SUGGESTIONS,
            crop_stages: CROP_STAGE_SUGGESTIONS,
            categories: CATEGORY_SUGGESTIONS,
        }
    }
}

fn outcome_banner(outcome: &AdviceOutcome) -> Option<Banner> {
    match outcome {
        AdviceOutcome::Recommendations { .. } => None,
        AdviceOutcome::ValidationWarning { message } | AdviceOutcome::EmptyResponse { message } => {
            Some(Banner::warning(message))
        }
        AdviceOutcome::ConfigurationError { message } => {
            Some(Banner::error("Configuration Error", message))
        }
        AdviceOutcome::RemoteFailure { message } => {
            Some(Banner::error("Could not get advice", message))
        }
    }
}

pub fn render_page(model: &PageModel) -> Result<String, DomainError> {
    let context = PageContext::from_model(model);
    Handlebars::new()
        .render_template(PAGE_TEMPLATE, &context)
        .map_err(|e| DomainError::internal(format!("failed to render page: {e}")))
}
