//! CLI train command: summary, policy, and observation outputs

use clap::Parser;
use taxiq::cli::commands::{
    evaluate::{self, EvaluateArgs},
    train::{self, TrainArgs},
};
use taxiq::q_learning::SavedPolicy;
use tempfile::tempdir;

fn parse_train<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_file_records_the_run() {
    let tmp = tempdir().unwrap();
    let summary_path = tmp.path().join("summary.json");

    let args = parse_train([
        "taxiq-train",
        "--episodes",
        "5",
        "--step-budget",
        "30",
        "--seed",
        "7",
        "--summary",
        summary_path.to_str().unwrap(),
    ]);

    train::execute(args).expect("training with summary should succeed");

    let contents = std::fs::read_to_string(&summary_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_episodes"], 5);
    assert_eq!(
        parsed["solved"].as_u64().unwrap() + parsed["timed_out"].as_u64().unwrap(),
        5
    );
    assert!(parsed["reward_history"].is_array());
}

#[test]
fn saved_policy_loads_and_evaluates() {
    let tmp = tempdir().unwrap();
    let policy_path = tmp.path().join("policy.mpk");

    let args = parse_train([
        "taxiq-train",
        "--episodes",
        "20",
        "--step-budget",
        "50",
        "--seed",
        "11",
        "--output",
        policy_path.to_str().unwrap(),
    ]);
    train::execute(args).expect("training with policy output should succeed");

    let saved = SavedPolicy::load_from_file(&policy_path).unwrap();
    assert_eq!(saved.metadata.episodes, 20);
    assert_eq!(saved.metadata.seed, Some(11));
    saved.to_agent().unwrap();

    let eval_args = EvaluateArgs::parse_from([
        "taxiq-evaluate",
        policy_path.to_str().unwrap(),
        "--episodes",
        "3",
        "--step-budget",
        "20",
        "--seed",
        "2",
    ]);
    evaluate::execute(eval_args).expect("evaluating the saved policy should succeed");
}

#[test]
fn observations_jsonl_has_one_line_per_episode() {
    let tmp = tempdir().unwrap();
    let jsonl_path = tmp.path().join("observations.jsonl");

    let args = parse_train([
        "taxiq-train",
        "--episodes",
        "4",
        "--step-budget",
        "25",
        "--seed",
        "3",
        "--observations",
        jsonl_path.to_str().unwrap(),
    ]);
    train::execute(args).expect("training with observations should succeed");

    let contents = std::fs::read_to_string(&jsonl_path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 4);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["episode"], 0);
    let steps = first["steps"].as_array().unwrap();
    assert!(!steps.is_empty() && steps.len() <= 25);
    // Every record carries the values the logger needs without recomputation.
    let record = &steps[0];
    for key in [
        "state",
        "action",
        "reward",
        "next_state",
        "old_q",
        "new_q",
        "observation",
    ] {
        assert!(!record[key].is_null(), "missing {key} in step record");
    }
}

#[test]
fn history_csv_is_written_with_headers() {
    let tmp = tempdir().unwrap();
    let csv_path = tmp.path().join("history.csv");

    let args = parse_train([
        "taxiq-train",
        "--episodes",
        "10",
        "--step-budget",
        "20",
        "--seed",
        "5",
        "--history-points",
        "5",
        "--history-csv",
        csv_path.to_str().unwrap(),
    ]);
    train::execute(args).expect("training with history CSV should succeed");

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["point", "mean_reward"])
    );
    assert_eq!(reader.records().count(), 5);
}
