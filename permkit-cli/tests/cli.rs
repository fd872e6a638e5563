use assert_cmd::prelude::*; // Add methods on commands
use assert_fs::{prelude::*, NamedTempFile};
use permkit::Permutation;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::process::Command; // Run programs
use test_log::test;

const BIN: &str = "pk";

#[cfg_attr(miri, ignore)]
#[test]
fn cli_argument_parsing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg("-h");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Print help"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("permkit"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("-v").arg("-q").arg("show").arg("1");
    cmd.assert().failure().stderr(predicate::str::contains(
        "argument '--verbose...' cannot be used with '--quiet'",
    ));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("-v").arg("--log").arg("error").arg("show").arg("1");
    cmd.assert().failure().stderr(predicate::str::contains(
        "argument '--verbose...' cannot be used with '--log <LOG_LEVEL>'",
    ));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("--log").arg("cats").arg("show").arg("1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("'--log <LOG_LEVEL>'"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("show").arg("1x3");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unexpected character `x`"));
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg("show").arg("3142");
    cmd.assert().success().stdout("3 1 4 2\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["show", "312", "--style", "cycle"]);
    cmd.assert().success().stdout("(1 3 2)\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["show", "2413", "--stats", "--plot"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("simple:"))
        .stdout(predicate::str::contains("inversions:"))
        .stdout(predicate::str::contains("\n     1  \n"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["show", "21", "--format", "json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""permutation": "2 1""#))
        .stdout(predicate::str::contains(r#""cycles": "(1 2)""#));

    // one cycle for each prime up to 53, so the order exceeds 64 bits
    let primes = (2..=53usize).filter(|&n| (2..n).all(|divisor| n % divisor != 0));
    let mut values = Vec::new();
    for prime in primes {
        let start = values.len();
        values.extend((1..prime).map(|offset| start + offset + 1));
        values.push(start + 1);
    }
    let long = values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--format", "json", "show", &long, "--stats"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let result: Value = serde_json::from_slice(&output)?;
    assert_eq!(
        result["statistics"]["order"],
        json!("32589158477190044730")
    );
    assert_eq!(result["statistics"]["rank"], Value::Null);
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn contains() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["contains", "35214", "132", "--count"]);
    cmd.assert().success().stdout("true\n1\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["contains", "12345", "21"]);
    cmd.assert().success().stdout("false\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["--format", "json", "contains", "123", "12", "-c"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""contained": true"#))
        .stdout(predicate::str::contains(r#""copies": 3"#));
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn enumerate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["enumerate", "--basis", "123", "--max-length", "6"]);
    cmd.assert().success().stdout("1, 1, 2, 5, 14, 42, 132\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["enumerate", "-n", "4"]);
    cmd.assert().success().stdout("1, 1, 2, 6, 24\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["enumerate", "-b", "2413,3142", "-n", "5", "--report", "time"]);
    cmd.assert()
        .success()
        .stdout("1, 1, 2, 6, 22, 90\n")
        .stderr(predicate::str::contains("Completed in"))
        .stderr(predicate::str::contains("layer 5"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["enumerate", "-b", "123", "-n", "3", "--format", "json"]);
    cmd.args(["--report", "short"]);
    let output = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("Completed in"))
        .stderr(predicate::str::contains("Generation").not())
        .get_output()
        .stdout
        .clone();
    let result: Value = serde_json::from_slice(&output)?;
    assert_eq!(
        result,
        json!({ "class": "Av(1 2 3)", "enumeration": [1, 1, 2, 5] })
    );
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn basis() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "--basis", "231,4321,2341", "-n", "5"]);
    cmd.assert().success().stdout("2 3 1\n4 3 2 1\n");

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "-b", "231,4321", "-n", "5", "--format", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let result: Value = serde_json::from_slice(&output)?;
    assert_eq!(
        result,
        json!({ "max_length": 5, "basis": ["2 3 1", "4 3 2 1"] })
    );

    let file = NamedTempFile::new("layers.txt")?;
    file.write_str("# the increasing permutations\n1\n12\n\n1 2 3\n")?;
    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "--from-file"]).arg(file.path());
    cmd.assert().success().stdout("2 1\n");

    let broken = NamedTempFile::new("broken.txt")?;
    broken.write_str("12\n1 1\n")?;
    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "--from-file"]).arg(broken.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unable to parse line 2"));

    let gap = NamedTempFile::new("gap.txt")?;
    gap.write_str("12\n")?;
    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "--from-file"]).arg(gap.path());
    cmd.assert().failure().stderr(predicate::str::contains(
        "no permutations of length 1, although the set contains some of length 2",
    ));

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["basis", "--from-file", "Non-existing-file.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn random() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["random", "7", "--avoid", "231", "--seed", "3"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let mut again = Command::cargo_bin(BIN)?;
    again.args(["random", "7", "--avoid", "231", "--seed", "3"]);
    again.assert().success().stdout(output);

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["random", "3", "--avoid", "1", "--max-attempts", "10"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("after 10 attempts"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.args(["random", "7", "--avoid", "231", "--seed", "5", "--format", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let result: Value = serde_json::from_slice(&output)?;
    let permutation: Permutation = result["permutation"]
        .as_str()
        .ok_or("permutation is not a string")?
        .parse()?;
    assert_eq!(permutation.len(), 7);
    assert!(permutation.avoids(&"231".parse()?));
    assert_eq!(result["values"], json!(permutation.values()));
    Ok(())
}

#[cfg_attr(miri, ignore)]
#[test]
fn tikz() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.args(["tikz", "21"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(r"\begin{tikzpicture}"))
        .stdout(predicate::str::contains(r"\draw[fill=black] (1,2) circle (5pt);"));
    Ok(())
}
