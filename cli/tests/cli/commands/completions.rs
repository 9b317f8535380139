use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::CMD_NAME;

macro_rules! test_completions {
    ($(($name:ident, $shell:expr, $expected:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("completions").arg($shell);
            cmd.assert()
                .success()
                .stdout(predicate::str::contains($expected))
                .stderr(predicate::str::is_empty());

            Ok(())
        }
    )*);
}

test_completions! {
    (completions_for_bash, "bash", "_gribber1()"),
    (completions_for_zsh, "zsh", "#compdef gribber1"),
    (completions_for_fish, "fish", "complete -c gribber1"),
}

#[test]
fn completions_for_unknown_shell() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("completions").arg("cmd.exe");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid value 'cmd.exe'"));

    Ok(())
}
