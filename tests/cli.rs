// CLI integration tests: each run loads the data file, applies one command and saves.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn cmd(data_file: &Path) -> Command {
    let exe = env!("CARGO_BIN_EXE_flatdb");
    let mut command = Command::new(exe);
    command.arg("--file").arg(data_file).env_remove("RUST_LOG");
    command
}

fn run(data_file: &Path, args: &[&str]) -> Output {
    cmd(data_file).args(args).output().expect("run flatdb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn insert_accepts_negative_numbers() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("db.txt");

    assert!(run(&data, &["create", "id", "delta"]).status.success());
    let insert = run(&data, &["insert", "1", "-5"]);
    assert!(
        insert.status.success(),
        "{}",
        String::from_utf8_lossy(&insert.stderr)
    );
    assert!(run(&data, &["insert", "2", "7"]).status.success());

    assert_eq!(fs::read_to_string(&data).unwrap(), "id|delta\n1|-5\n2|7\n");

    let analyze = run(&data, &["analyze", "--column", "1"]);
    assert!(analyze.status.success());
    let report = stdout(&analyze);
    assert!(report.contains("sum:           2"), "{report}");
    assert!(report.contains("min:           -5"), "{report}");

    let search = run(&data, &["search", "--column", "1", "-5"]);
    assert!(search.status.success());
    assert!(stdout(&search).contains("1 -5 (distance 0)"));
}

#[test]
fn create_refuses_to_replace_rows_without_force() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("db.txt");

    assert!(run(&data, &["create", "id", "name"]).status.success());
    assert!(run(&data, &["insert", "1", "alice"]).status.success());

    let refused = run(&data, &["create", "sku", "price"]);
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("--force"));
    assert_eq!(fs::read_to_string(&data).unwrap(), "id|name\n1|alice\n");

    let forced = run(&data, &["create", "sku", "price", "--force"]);
    assert!(forced.status.success());
    assert_eq!(fs::read_to_string(&data).unwrap(), "sku|price\n");

    let show = run(&data, &["show"]);
    assert!(show.status.success());
    assert!(stdout(&show).contains("0 rows"));
}

#[test]
fn create_on_empty_table_needs_no_force() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("db.txt");

    assert!(run(&data, &["create", "id"]).status.success());
    assert!(run(&data, &["create", "key", "value"]).status.success());
    assert_eq!(fs::read_to_string(&data).unwrap(), "key|value\n");
}

#[test]
fn commands_fail_without_data_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let data = temp.path().join("missing.txt");

    let show = run(&data, &["show"]);
    assert!(!show.status.success());
    assert!(String::from_utf8_lossy(&show.stderr).contains("flatdb create"));
    assert!(!data.exists());
}
