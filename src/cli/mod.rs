use clap::{Args, Subcommand};

use crate::domain::{
    FormInput, DEFAULT_CATEGORY, DEFAULT_CROP_STAGE, DEFAULT_DISTRICT, DEFAULT_FARMER_LOCATION,
    DEFAULT_FARMER_NAME, DEFAULT_LAND_SIZE,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the advice form over HTTP
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the form on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Ask one question and print the advice
    Ask {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the prompt that would be sent, without calling the API
    Prompt {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(short, long)]
    pub question: String,

    #[arg(short, long, default_value = DEFAULT_DISTRICT)]
    pub district: String,

    #[arg(short = 's', long, default_value = DEFAULT_CROP_STAGE)]
    pub crop_stage: String,

    #[arg(short, long, default_value = DEFAULT_CATEGORY)]
    pub category: String,

    #[arg(long, default_value = DEFAULT_FARMER_NAME)]
    pub name: String,

    #[arg(long, default_value = DEFAULT_FARMER_LOCATION)]
    pub location: String,

    /// Hectares
    #[arg(long, default_value = DEFAULT_LAND_SIZE)]
    pub land_size: String,
}

impl QueryArgs {
    pub fn into_form_input(self) -> FormInput {
        FormInput {
            farmer_name: self.name,
            farmer_location: self.location,
            land_size: self.land_size,
            district: self.district,
            crop_stage: self.crop_stage,
            category: self.category,
            question: self.question,
            api_key: None,
        }
    }
}
