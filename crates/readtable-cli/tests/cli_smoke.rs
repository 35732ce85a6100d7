use predicates::prelude::*;
use std::io::Write;
use assert_cmd::Command;
use tempfile::NamedTempFile;

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fields"));
    Ok(())
}

#[test]
fn good_records_are_echoed() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "# id\tx\tname\n1\t0.5\tann\n\n2\t-1e2\tbob\n")?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "u32[1,10],f64,str", "--delimiter", "tab", "--comment", "#"])
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    assert_eq!(out, "1\t0.5\tann\n2\t-100.0\tbob\n");
    Ok(())
}

#[test]
fn json_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "7 skipme 2.5\n")?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "i64,skip,f64", "--json"])
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(v, serde_json::json!([7, 2.5]));
    Ok(())
}

#[test]
fn bad_records_are_reported_and_fail_the_run() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "u16,u16", "--delimiter", "comma"])
        .write_stdin("1,2\n3,-4\n5,6\n")
        .assert()
        .failure()
        .stdout("1\t2\n5\t6\n")
        .stderr(predicate::str::contains(
            "input, line 2, position 2 / column 1: Overflow or underflow",
        ))
        .stderr(predicate::str::contains("1 of 3 records failed"));
    Ok(())
}

#[test]
fn nonfinite_can_be_rejected() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "f64", "--reject-nonfinite"])
        .write_stdin("nan\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NaN or infinity read"));
    Ok(())
}

#[test]
fn missing_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "str"])
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error opening file"));
    Ok(())
}

#[test]
fn bad_field_list_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "u32[9,1]"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimum is greater than maximum"));
    Ok(())
}

#[test]
fn missing_last_column_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("readtable-cli"))
        .args(["--fields", "u32,str", "--delimiter", "comma"])
        .write_stdin("42\n7,x\n")
        .assert()
        .failure()
        .stdout("7\tx\n")
        .stderr(predicate::str::contains(
            "input, line 1, position 2 / column 1: Unexpected end of line",
        ));
    Ok(())
}
