use super::*;
use clap::Parser;

#[test]
fn search_parses_patients_file_and_query() {
    let cli = Cli::try_parse_from(["carescope", "search", "--patients", "p.json", "jo"])
        .expect("parse");
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.patients, PathBuf::from("p.json"));
            assert_eq!(args.query, "jo");
        }
        _ => panic!("expected search command"),
    }
}

#[test]
fn request_log_flag_is_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from([
        "carescope",
        "logs",
        "--request-log",
        "/tmp/requests.jsonl",
        "--operation",
        "risk.predict",
    ])
    .expect("parse");
    assert_eq!(cli.request_log, Some(PathBuf::from("/tmp/requests.jsonl")));
    match cli.command {
        Commands::Logs(args) => {
            assert_eq!(args.limit, 20);
            assert_eq!(args.operation.as_deref(), Some("risk.predict"));
            assert!(args.status.is_none());
        }
        _ => panic!("expected logs command"),
    }
}

#[test]
fn logs_limit_must_be_positive() {
    let parsed = Cli::try_parse_from(["carescope", "logs", "--limit", "0"]);
    assert!(parsed.is_err(), "zero limit must be rejected");
}

#[test]
fn predict_collects_repeated_drug_flags() {
    let cli = Cli::try_parse_from([
        "carescope",
        "predict",
        "--vocabulary",
        "vocab.json",
        "--opioids",
        "opioids.json",
        "--drug",
        "Oxycodone HCl",
        "--drug",
        "lisinopril",
        "--high-share",
        "0.5",
    ])
    .expect("parse");
    match cli.command {
        Commands::Predict(args) => {
            assert_eq!(args.drugs, vec!["Oxycodone HCl", "lisinopril"]);
            assert_eq!(args.model.high_share, Some(0.5));
            assert!(args.model.medium_share.is_none());
            assert!(args.prescriptions.is_none());
        }
        _ => panic!("expected predict command"),
    }
}

#[test]
fn predict_rejects_share_outside_unit_interval() {
    let parsed = Cli::try_parse_from([
        "carescope",
        "predict",
        "--vocabulary",
        "v.json",
        "--opioids",
        "o.json",
        "--medium-share",
        "1.5",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn score_parses_label_probability_pairs() {
    let cli = Cli::try_parse_from([
        "carescope",
        "score",
        "--class",
        "High=0.8",
        "--class",
        "Medium=0.15",
        "--class",
        "Low=0.05",
    ])
    .expect("parse");
    match cli.command {
        Commands::Score(args) => {
            assert_eq!(
                args.classes,
                vec![
                    ("High".to_string(), 0.8),
                    ("Medium".to_string(), 0.15),
                    ("Low".to_string(), 0.05),
                ]
            );
            assert!(args.predicted.is_none());
        }
        _ => panic!("expected score command"),
    }
}

#[test]
fn score_rejects_malformed_class_pairs() {
    for raw in ["High", "=0.5", "High=lots"] {
        let parsed = Cli::try_parse_from(["carescope", "score", "--class", raw]);
        assert!(parsed.is_err(), "{raw} must be rejected");
    }
}

#[test]
fn score_requires_at_least_one_class() {
    assert!(Cli::try_parse_from(["carescope", "score"]).is_err());
}

#[test]
fn health_model_files_must_come_together() {
    assert!(Cli::try_parse_from(["carescope", "health"]).is_ok());
    assert!(Cli::try_parse_from(["carescope", "health", "--vocabulary", "v.json"]).is_err());
}
