use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::{CMD_NAME, utils};

macro_rules! test_subcommands_without_args {
    ($(($name:ident, $str:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg($str);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(
                    predicate::str::starts_with(
                        "error: the following required arguments were not provided:",
                    )
                        .and(predicate::str::contains("Usage:"))
                        .and(predicate::str::contains("Commands:").not()),
                );

            Ok(())
        }
    )*);
}

test_subcommands_without_args! {
    (completions_without_args, "completions"),
    (decode_without_args, "decode"),
    (info_without_args, "info"),
    (list_without_args, "list"),
    (inspect_without_args, "inspect"),
}

macro_rules! test_subcommands_with_nonexisting_file {
    ($(($name:ident, $command:expr, $args:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let dir = TempDir::new()?;
            let file_path = dir.path().join("nosuchfile");
            let file_path = format!("{}", file_path.display());

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg($command).arg(file_path).args($args);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::starts_with("error: No such file or directory"));

            Ok(())
        }
    )*);
}

test_subcommands_with_nonexisting_file! {
    (decode_with_nonexisting_file, "decode", vec!["0"]),
    (info_with_nonexisting_file, "info", Vec::<&str>::new()),
    (list_with_nonexisting_file, "list", Vec::<&str>::new()),
    (inspect_with_nonexisting_file, "inspect", Vec::<&str>::new()),
}

macro_rules! test_subcommands_with_invalid_input {
    ($(($name:ident, $command:expr, $input:expr, $args:expr, $message:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = $input;

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg($command).arg(input.path()).args($args);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::diff($message));

            Ok(())
        }
    )*);
}

test_subcommands_with_invalid_input! {
    (
        list_with_empty_file,
        "list",
        utils::empty_file()?,
        Vec::<&str>::new(),
        "error: empty GRIB1 data\n"
    ),
    (
        info_with_too_small_file,
        "info",
        utils::too_small_file()?,
        Vec::<&str>::new(),
        "error: error reading GRIB record @ byte offset 0: \
         Indicator Section needs 8 bytes, but only 3 bytes supplied\n"
    ),
    (
        inspect_with_non_grib_file,
        "inspect",
        utils::non_grib_file()?,
        Vec::<&str>::new(),
        "error: error reading GRIB record @ byte offset 0: \
         Not GRIB data: first four bytes = \"foo \", want \"GRIB\"\n"
    ),
    (
        decode_with_non_grib_file,
        "decode",
        utils::non_grib_file()?,
        vec!["0"],
        "error: error reading GRIB record @ byte offset 0: \
         Not GRIB data: first four bytes = \"foo \", want \"GRIB\"\n"
    ),
}
