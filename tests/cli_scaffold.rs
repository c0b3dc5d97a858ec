use assert_cmd::Command;
use gos::libs::io::Dataset;
use predicates::prelude::*;

#[test]
fn command_scaffold_join() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gos")?;
    let output = cmd.arg("scaffold").arg("tests/gos/join.json").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // one line per joined genome
    assert_eq!(stdout.lines().count(), 2);
    for (line, genome) in stdout.lines().zip(["a", "b"]) {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 9);
        let mut ends = vec![fields[0], fields[1]];
        ends.sort();
        assert_eq!(ends, vec!["1h", "2t"]);
        assert_eq!(fields[2], genome);
        assert_eq!(&fields[3..], &["2", "3", "1", "-", "-", "a,b"]);
    }

    Ok(())
}

#[test]
fn command_scaffold_stdin() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gos")?;
    cmd.arg("scaffold")
        .arg("stdin")
        .write_stdin(std::fs::read_to_string("tests/gos/join.json")?)
        .assert()
        .success()
        .stdout(predicate::str::contains("\ta\t2\t3\t1\t"));

    Ok(())
}

#[test]
fn command_scaffold_json() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gos")?;
    let output = cmd
        .arg("scaffold")
        .arg("tests/gos/join.json")
        .arg("--json")
        .output()?;
    let records: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["score"], 2);
    assert_eq!(records[0]["target"], serde_json::json!(["a", "b"]));
    assert_eq!(records[0]["target_split"], serde_json::json!([["a", "b"]]));
    assert!(records[0].get("repeat").is_none());

    Ok(())
}

#[test]
fn command_scaffold_repeats() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gos")?;
    let output = cmd.arg("scaffold").arg("tests/gos/repeat.json").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 1);
    let fields: Vec<&str> = stdout.trim_end().split('\t').collect();
    // from the tail end of the copy to its head end
    assert_eq!(&fields[..4], &["1h", "2t", "a", "2"]);
    assert_eq!(fields[6], "r");

    Ok(())
}

#[test]
fn command_scaffold_targets_and_exclude() -> anyhow::Result<()> {
    // every genome is requested by default
    let mut cmd = Command::cargo_bin("gos")?;
    let output = cmd.arg("scaffold").arg("tests/gos/partial.json").output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("\ta\t"));

    // complete genomes keep their open ends
    let mut cmd = Command::cargo_bin("gos")?;
    cmd.arg("scaffold")
        .arg("tests/gos/partial.json")
        .arg("-e")
        .arg("a")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let mut cmd = Command::cargo_bin("gos")?;
    cmd.arg("scaffold")
        .arg("tests/gos/partial.json")
        .arg("-t")
        .arg("b,c")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_scaffold_graph() -> anyhow::Result<()> {
    let tempdir = tempfile::TempDir::new()?;
    let graph_file = tempdir.path().join("scaffolded.json");

    let mut cmd = Command::cargo_bin("gos")?;
    cmd.arg("scaffold")
        .arg("tests/gos/join.json")
        .arg("--graph")
        .arg(&graph_file)
        .assert()
        .success();

    let dataset = Dataset::from_file(graph_file.to_str().unwrap())?;
    assert_eq!(dataset.targets, vec!["a", "b"]);
    let graph = dataset.graph()?;
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.irregular_edge_count(), 0);
    assert_eq!(dataset.edges[0].multicolor.names(), vec!["a", "b", "c"]);

    Ok(())
}

#[test]
fn command_scaffold_unknown_genome() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("gos")?;
    cmd.arg("scaffold")
        .arg("tests/gos/unknown.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Genome x is not a leaf"));

    Ok(())
}
