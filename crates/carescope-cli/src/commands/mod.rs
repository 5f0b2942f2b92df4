use std::path::PathBuf;

use anyhow::{Context, Result};
use carescope_core::models::{PatientRecord, PrescriptionEntry};
use carescope_core::scorer::{score, score_prediction};
use carescope_core::{AppConfig, CareScope};

use crate::cli::{Commands, HealthArgs, LogsArgs, PredictArgs, ScoreArgs, SearchArgs};

mod support;

use self::support::{
    build_model_from_args, build_rule_model, load_patients, load_prescriptions, print_json,
};

pub(crate) fn run(request_log: Option<PathBuf>, command: Commands) -> Result<()> {
    let mut config = AppConfig::from_env().context("invalid environment configuration")?;
    if request_log.is_some() {
        config.request_log.path = request_log;
    }
    let app = CareScope::new(config);

    match command {
        Commands::Search(args) => run_search(&app, &args),
        Commands::Predict(args) => run_predict(&app, &args),
        Commands::Score(args) => run_score(&args),
        Commands::Health(args) => run_health(&app, &args),
        Commands::Logs(args) => run_logs(&app, &args),
    }
}

fn run_search(app: &CareScope, args: &SearchArgs) -> Result<()> {
    app.sync_patients(load_patients(&args.patients)?)?;
    let hits = app.search_patients(&args.query)?;
    let records = hits.iter().map(AsRef::as_ref).collect::<Vec<&PatientRecord>>();
    print_json(&records)
}

fn run_predict(app: &CareScope, args: &PredictArgs) -> Result<()> {
    app.load_classifier(build_model_from_args(&args.model, app.config())?)?;
    let mut entries = match &args.prescriptions {
        Some(path) => load_prescriptions(path)?,
        None => Vec::new(),
    };
    entries.extend(args.drugs.iter().map(PrescriptionEntry::new));
    let assessment = app.predict(&entries)?;
    print_json(&assessment)
}

fn run_score(args: &ScoreArgs) -> Result<()> {
    let (labels, probabilities): (Vec<String>, Vec<f64>) = args.classes.iter().cloned().unzip();
    let summary = match &args.predicted {
        Some(predicted) => score_prediction(predicted, &labels, &probabilities),
        None => score(&labels, &probabilities),
    };
    print_json(&summary)
}

fn run_health(app: &CareScope, args: &HealthArgs) -> Result<()> {
    if let (Some(vocabulary), Some(opioids)) = (&args.vocabulary, &args.opioids) {
        app.load_classifier(build_rule_model(
            vocabulary,
            opioids,
            None,
            None,
            app.config(),
        )?)?;
    }
    print_json(&app.health())
}

fn run_logs(app: &CareScope, args: &LogsArgs) -> Result<()> {
    let logs = app.list_request_logs_filtered(
        args.limit,
        args.operation.as_deref(),
        args.status.as_deref(),
    )?;
    print_json(&logs)
}
