use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn given_help_flag_when_run_then_usage_shown() {
    let mut cmd = Command::cargo_bin("ollo").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ollama"));
}

#[test]
fn given_generate_config_flag_when_run_then_toml_on_stdout() {
    let mut cmd = Command::cargo_bin("ollo").unwrap();
    cmd.arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("embed_model"))
        .stdout(predicate::str::contains("gen_model"));
}

#[test]
fn given_dummy_embedder_when_embed_then_no_network_needed() {
    let mut cmd = Command::cargo_bin("ollo").unwrap();
    cmd.args(["--dummy", "embed", "for loops", "break statements"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doc 0"))
        .stdout(predicate::str::contains("pairwise dot products"));
}

#[test]
fn given_ask_without_prompt_when_run_then_usage_error() {
    let mut cmd = Command::cargo_bin("ollo").unwrap();
    cmd.arg("ask").assert().failure();
}
