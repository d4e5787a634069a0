use std::path::Path;

use clap::Parser;
use jiff::civil::date;
use serde_json::json;

use sparc_cli::cli::{Cli, Command, ConfigAction, FormatArg, RangeArg};
use sparc_cli::commands::{self, load_entries};
use sparc_cli::config::SparcConfig;
use sparc_core::models::task::TaskCode;

fn log_args(file: &Path, task: &str, minutes: &str, day: &str) -> Command {
    let file = file.to_str().unwrap();
    Cli::try_parse_from([
        "sparc", "log", file, "--task", task, "--minutes", minutes, "--date", day,
    ])
    .unwrap()
    .command
}

#[test]
fn parses_export_arguments() {
    let cli = Cli::try_parse_from([
        "sparc", "export", "entries.json", "--format", "xlsx", "--range", "week",
    ])
    .unwrap();
    match cli.command {
        Command::Export {
            format, range, raw, ..
        } => {
            assert_eq!(format, FormatArg::Xlsx);
            assert_eq!(range, RangeArg::Week);
            assert!(!raw);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_task_code() {
    assert!(
        Cli::try_parse_from([
            "sparc", "log", "e.json", "--task", "NAPPING", "--minutes", "5"
        ])
        .is_err()
    );
}

#[test]
fn parses_config_subcommand() {
    let cli = Cli::try_parse_from(["sparc", "config", "init", "--force"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Config {
            action: ConfigAction::Init { force: true }
        }
    ));
}

#[tokio::test]
async fn log_then_total() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entries.json");
    let config = SparcConfig::default();
    let config_path = dir.path().join("config.json");

    commands::run(log_args(&file, "PAF", "15", "2025-01-15"), &config, &config_path)
        .await
        .unwrap();
    commands::run(log_args(&file, "PAF", "10", "2025-01-15"), &config, &config_path)
        .await
        .unwrap();
    commands::run(log_args(&file, "EMAILS", "30", "2025-01-14"), &config, &config_path)
        .await
        .unwrap();

    let entries = load_entries(&file).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].occurred_on, date(2025, 1, 15));

    let out = commands::totals(&file, Some(date(2025, 1, 15)), false, &config)
        .await
        .unwrap();
    let paf = out.lines().find(|l| l.trim_start().starts_with("PAF")).unwrap();
    assert!(paf.trim_end().ends_with("25"));
    let total = out.lines().last().unwrap();
    assert!(total.trim_start().starts_with("TOTAL"));
    assert!(total.trim_end().ends_with("25"));
}

#[tokio::test]
async fn invalid_entry_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entries.json");
    let config = SparcConfig::default();

    let err = commands::run(
        log_args(&file, "OTHER", "15", "2025-01-15"),
        &config,
        &dir.path().join("config.json"),
    )
    .await;
    assert!(err.is_err());
    assert!(!file.exists());
}

#[tokio::test]
async fn duplicate_and_delete_update_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entries.json");
    let config = SparcConfig::default();
    let config_path = dir.path().join("config.json");

    let id = commands::run(log_args(&file, "AMU", "20", "2025-01-15"), &config, &config_path)
        .await
        .unwrap();

    let dup = Cli::try_parse_from([
        "sparc",
        "duplicate",
        file.to_str().unwrap(),
        id.as_str(),
        "--onto",
        "2025-01-16",
    ])
    .unwrap();
    let copy_id = commands::run(dup.command, &config, &config_path).await.unwrap();
    assert_ne!(copy_id, id);

    let entries = load_entries(&file).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].occurred_on, date(2025, 1, 16));
    assert_eq!(entries[0].task, TaskCode::Amu);

    let del = Cli::try_parse_from(["sparc", "delete", file.to_str().unwrap(), id.as_str()]).unwrap();
    let out = commands::run(del.command, &config, &config_path).await.unwrap();
    assert_eq!(out, "deleted 1 of 1 entries");
    assert_eq!(load_entries(&file).unwrap().len(), 1);
}

#[tokio::test]
async fn export_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entries.json");
    let out_dir = dir.path().join("out");
    let config = SparcConfig::default();
    let config_path = dir.path().join("config.json");

    commands::run(log_args(&file, "PAF", "15", "2025-01-15"), &config, &config_path)
        .await
        .unwrap();

    let cli = Cli::try_parse_from([
        "sparc",
        "export",
        file.to_str().unwrap(),
        "--range",
        "today",
        "--today",
        "2025-01-15",
        "--out",
        out_dir.to_str().unwrap(),
    ])
    .unwrap();
    commands::run(cli.command, &config, &config_path).await.unwrap();

    let written = out_dir.join("sparc_entries_2025-01-15_today.csv");
    let csv = std::fs::read_to_string(written).unwrap();
    assert!(csv.starts_with("Date,Task,Other Task,Minutes,Comment,Created At,Updated At\n"));
    assert!(csv.contains("\n2025-01-15,PAF,,15,"));
}

#[tokio::test]
async fn raw_export_keeps_text_values() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("raw.json");
    std::fs::write(
        &file,
        json!([{ "task": "AMR", "minutes": "12", "occurred_on": "sometime" }]).to_string(),
    )
    .unwrap();

    let exported = commands::export_raw(
        &file,
        sparc_export::file::ExportFormat::Csv,
        sparc_export::range::ExportRange::All,
        date(2025, 1, 15),
        &SparcConfig::default(),
    )
    .unwrap();
    let csv = String::from_utf8(exported.bytes).unwrap();
    assert!(csv.contains("\nsometime,AMR,,12,"));
}

#[tokio::test]
async fn scores_a_response_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("survey.json");
    let responses: Vec<_> = (1..=12)
        .map(|q| json!({ "question_number": q, "response_value": 1 }))
        .collect();
    std::fs::write(&file, serde_json::to_string(&responses).unwrap()).unwrap();

    let out = commands::score(&file, false, &SparcConfig::default())
        .await
        .unwrap();
    let scores: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(scores["exhaustion_score"], json!(12));
    assert_eq!(scores["disengagement_score"], json!(12));
    assert_eq!(scores["total_average"], json!(2.0));
}

#[tokio::test]
async fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = SparcConfig::default();

    let init = |force| Command::Config {
        action: ConfigAction::Init { force },
    };
    commands::run(init(false), &config, &path).await.unwrap();
    assert!(path.exists());
    assert!(commands::run(init(false), &config, &path).await.is_err());
    commands::run(init(true), &config, &path).await.unwrap();

    let shown = commands::run(
        Command::Config {
            action: ConfigAction::Show,
        },
        &config,
        &path,
    )
    .await
    .unwrap();
    assert!(shown.contains("\"user_id\": \"local\""));
}

#[tokio::test]
async fn score_summary_is_a_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("survey.json");
    let responses: Vec<_> = (1..=12)
        .map(|q| json!({ "question_number": q, "response_value": 2 }))
        .collect();
    std::fs::write(&file, serde_json::to_string(&responses).unwrap()).unwrap();

    let cli = Cli::try_parse_from([
        "sparc",
        "score",
        file.to_str().unwrap(),
        "--summary",
    ])
    .unwrap();
    let out = commands::run(cli.command, &SparcConfig::default(), &dir.path().join("c.json"))
        .await
        .unwrap();

    assert!(out.starts_with("Oldenburg Burnout Inventory\nExhaustion\n"));
    assert!(out.contains("Disengagement"));
    assert!(out.lines().last().unwrap().trim_start().starts_with("Total Average"));
}

#[test]
fn typed_export_keeps_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("entries.json");
    let entry = |day: &str, task: &str, comment: &str| {
        json!({
            "id": uuid::Uuid::new_v4(),
            "task": task,
            "other_task": null,
            "minutes": 10,
            "occurred_on": day,
            "comment": comment,
            "created_at": "2025-01-12T09:00:00Z",
            "updated_at": "2025-01-12T09:00:00Z",
        })
    };
    let entries = json!([
        entry("2025-01-10", "PAF", "first"),
        entry("2025-01-12", "AMU", "second"),
    ]);
    std::fs::write(&file, entries.to_string()).unwrap();

    let typed = commands::export(
        &file,
        sparc_export::file::ExportFormat::Csv,
        sparc_export::range::ExportRange::All,
        date(2025, 1, 12),
        &SparcConfig::default(),
    )
    .unwrap();
    let raw = commands::export_raw(
        &file,
        sparc_export::file::ExportFormat::Csv,
        sparc_export::range::ExportRange::All,
        date(2025, 1, 12),
        &SparcConfig::default(),
    )
    .unwrap();

    let typed = String::from_utf8(typed.bytes).unwrap();
    let rows: Vec<_> = typed.lines().skip(1).collect();
    assert!(rows[0].starts_with("2025-01-10,PAF,,10,first,"));
    assert!(rows[1].starts_with("2025-01-12,AMU,,10,second,"));
    assert_eq!(typed, String::from_utf8(raw.bytes).unwrap());
}
