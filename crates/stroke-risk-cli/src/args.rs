//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stroke_risk_core::{ConfigurationError, EngineConfig, PatientForm};

#[derive(Parser, Debug)]
#[command(name = "stroke-risk")]
#[command(about = "Stroke risk screening with an explained linear model")]
pub struct Cli {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the trained model lives.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Fitted encoder artifact (JSON)
    #[arg(
        long,
        global = true,
        env = "STROKE_RISK_ENCODER",
        default_value = "models/encoder.json"
    )]
    pub encoder: PathBuf,

    /// Fitted classifier artifact (JSON)
    #[arg(
        long,
        global = true,
        env = "STROKE_RISK_CLASSIFIER",
        default_value = "models/classifier.json"
    )]
    pub classifier: PathBuf,

    /// Expected SHA-256 of the encoder artifact
    #[arg(long, global = true, env = "STROKE_RISK_ENCODER_SHA256")]
    pub encoder_sha256: Option<String>,

    /// Expected SHA-256 of the classifier artifact
    #[arg(long, global = true, env = "STROKE_RISK_CLASSIFIER_SHA256")]
    pub classifier_sha256: Option<String>,
}

impl ArtifactArgs {
    /// Resolve into the engine configuration.
    pub fn to_config(&self) -> Result<EngineConfig, ConfigurationError> {
        let mut config = EngineConfig::new(self.encoder.clone(), self.classifier.clone())?;
        if let Some(digest) = &self.encoder_sha256 {
            config = config.with_encoder_sha256(digest)?;
        }
        if let Some(digest) = &self.classifier_sha256 {
            config = config.with_classifier_sha256(digest)?;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one patient and write the report
    Assess {
        /// Patient name as entered at registration
        #[arg(long)]
        name: String,

        #[command(flatten)]
        details: DetailsArgs,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
        format: OutputFormat,

        /// Output file (defaults to the format's download name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the loaded model: features, labels, coefficients and fingerprints
    Inspect,
}

/// Details form fields. Defaults match the form's initial values.
#[derive(Args, Debug, Clone)]
pub struct DetailsArgs {
    #[arg(long, default_value_t = 45)]
    pub age: i64,

    /// Male or Female
    #[arg(long, default_value = "Male")]
    pub gender: String,

    /// 0 = No, 1 = Yes
    #[arg(long, default_value_t = 0)]
    pub hypertension: i64,

    /// 0 = No, 1 = Yes
    #[arg(long, default_value_t = 0)]
    pub heart_disease: i64,

    /// Yes or No
    #[arg(long, default_value = "Yes")]
    pub ever_married: String,

    /// Private, Self-employed, Govt_job, children or Never_worked
    #[arg(long, default_value = "Private")]
    pub work_type: String,

    /// Urban or Rural
    #[arg(long, default_value = "Urban")]
    pub residence_type: String,

    #[arg(long, default_value_t = 120.0)]
    pub avg_glucose_level: f64,

    #[arg(long, default_value_t = 25.0)]
    pub bmi: f64,

    /// never smoked, formerly smoked or smokes
    #[arg(long, default_value = "never smoked")]
    pub smoking_status: String,
}

impl From<DetailsArgs> for PatientForm {
    fn from(args: DetailsArgs) -> Self {
        PatientForm {
            age: args.age,
            gender: args.gender,
            hypertension: args.hypertension,
            heart_disease: args.heart_disease,
            ever_married: args.ever_married,
            work_type: args.work_type,
            residence_type: args.residence_type,
            avg_glucose_level: args.avg_glucose_level,
            bmi: args.bmi,
            smoking_status: args.smoking_status,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Json,
    Text,
}
