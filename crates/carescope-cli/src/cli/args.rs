use std::path::PathBuf;

use clap::Args;

use super::parsers::{parse_class_probability, parse_min_one_usize, parse_unit_interval_f64};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// JSON file holding a patient array or a `{"patients": [...]}` payload.
    #[arg(long)]
    pub patients: PathBuf,
    #[arg(allow_hyphen_values = true)]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// JSON array of feature names the model was trained on.
    #[arg(long)]
    pub vocabulary: PathBuf,
    /// JSON array of opioid drug names used to flag opioid features.
    #[arg(long)]
    pub opioids: PathBuf,
    #[arg(long, value_parser = parse_unit_interval_f64)]
    pub high_share: Option<f64>,
    #[arg(long, value_parser = parse_unit_interval_f64)]
    pub medium_share: Option<f64>,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Drug name of one prescription; repeat for more.
    #[arg(long = "drug", value_name = "NAME")]
    pub drugs: Vec<String>,
    /// JSON file holding a prescription array or a `{"prescriptions": [...]}` payload.
    #[arg(long)]
    pub prescriptions: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Class probability as `LABEL=PROBABILITY`; repeat per class.
    #[arg(long = "class", value_name = "LABEL=PROB", value_parser = parse_class_probability, required = true)]
    pub classes: Vec<(String, f64)>,
    /// Keep this label instead of the most probable class.
    #[arg(long)]
    pub predicted: Option<String>,
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Load a rule model from this vocabulary before reporting.
    #[arg(long, requires = "opioids")]
    pub vocabulary: Option<PathBuf>,
    #[arg(long, requires = "vocabulary")]
    pub opioids: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[arg(long, default_value_t = 20, value_parser = parse_min_one_usize)]
    pub limit: usize,
    #[arg(long)]
    pub operation: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}
