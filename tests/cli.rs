use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("solar-sizer");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("size-file"))
        .stdout(predicate::str::contains("catalog"));
    Ok(())
}

#[test]
fn non_numeric_flag_is_rejected_by_the_parser() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("solar-sizer");
    cmd.args(["size", "-m", "lots", "-s", "5.5"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
