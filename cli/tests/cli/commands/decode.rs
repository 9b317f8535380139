use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::{CMD_NAME, utils};

#[test]
fn decoding_values_with_positions() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("decode").arg(input.path()).arg("0");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "    Latitude    Longitude          Value
       0.000        0.000            100
       0.000        1.000            101
       1.000        0.000            102
       1.000        1.000            103
",
        ))
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn decoding_values_without_grid() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("decode").arg(input.path()).arg("1");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "       #          Value
       0            1.5
       1            2.5
",
        ))
        .stderr(predicate::str::is_empty());

    Ok(())
}

macro_rules! test_decoding_values_with_bitmap {
    ($(($name:ident, $input:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = $input;

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("decode").arg(input.path()).arg("0");
            cmd.assert()
                .success()
                .stdout(predicate::str::diff(
                    "    Latitude    Longitude          Value
       0.000        0.000            100
       0.000        1.000            NaN
       1.000        0.000            NaN
       1.000        1.000            101
",
                ))
                .stderr(predicate::str::is_empty());

            Ok(())
        }
    )*);
}

test_decoding_values_with_bitmap! {
    (decoding_values_with_bitmap, utils::with_bitmap()?),
    (
        decoding_values_with_bits_set_past_grid_points,
        utils::with_bitmap_set_padding()?
    ),
}

macro_rules! test_operation_with_byte_order_options {
    ($(($name:ident, $message_index:expr, $byte_order_flag:expr, $to_bytes:expr, $expected:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = utils::two_messages()?;

            let dir = TempDir::new()?;
            let out_path = dir.path().join("out.bin");
            let out_path = format!("{}", out_path.display());

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("decode")
                .arg(input.path())
                .arg($message_index)
                .arg($byte_order_flag)
                .arg(&out_path);
            cmd.assert()
                .success()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::is_empty());

            let expected: &[f32] = $expected;
            let to_bytes: fn(&f32) -> [u8; 4] = $to_bytes;
            let expected = expected.iter().flat_map(to_bytes).collect::<Vec<_>>();
            let actual = std::fs::read(&out_path)?;
            assert_eq!(actual, expected);

            Ok(())
        }
    )*);
}

test_operation_with_byte_order_options! {
    (
        decoding_as_big_endian,
        "0",
        "-b",
        |f| f.to_be_bytes(),
        &[100.0, 101.0, 102.0, 103.0]
    ),
    (
        decoding_as_little_endian,
        "0",
        "-l",
        |f| f.to_le_bytes(),
        &[100.0, 101.0, 102.0, 103.0]
    ),
    (
        decoding_float_samples_as_little_endian,
        "1",
        "-l",
        |f| f.to_le_bytes(),
        &[1.5, 2.5]
    ),
}

#[test]
fn decoding_with_both_byte_orders() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("decode")
        .arg(input.path())
        .arg("0")
        .args(["-b", "be.bin", "-l", "le.bin"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot be used with"));

    Ok(())
}

#[test]
fn decoding_nonexisting_index() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("decode").arg(input.path()).arg("2");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::diff("error: no such index: 2\n"));

    Ok(())
}
