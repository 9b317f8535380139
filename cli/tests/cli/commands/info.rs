use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

#[test]
fn info_of_single_message() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::with_edition2()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg(input.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "\
Message 0

    Offset:                                 0
    Total Length:                           87
    Grid:                                   regular_ll (0)
      Number of points:                     4
    Product:                                10u (Eastward component of the 10m wind)
      Parameter Table Version:              128
      Originating Centre:                   98
      Sub-centre:                           0
      Generating Process:                   145
      Level Type:                           1
      Level:                                0
      Reference Time:                       2005-03-09 06:00:00 UTC
      Forecast Time:                        acc 0-12h
      Forecast Time Unit:                   Hour
      Time Range:                           Accumulation (reference time + P1 to reference time + P2)
    Bit-map:                                none
    Data Representation:
      Reference Value:                      100
      Binary Scale Factor:                  0
      Decimal Scale Factor:                 0
      Bits per Value:                       8

",
        ))
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn info_of_multiple_messages() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg(input.path());
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("Message 0\n")
                .and(predicate::str::contains("Message 1\n"))
                .and(predicate::str::contains(
                    "    Offset:                                 89\n",
                ))
                .and(predicate::str::contains(
                    "    Total Length:                           59\n",
                ))
                .and(predicate::str::contains(
                    "    Grid:                                   none\n",
                ))
                .and(predicate::str::contains(
                    "    Product:                                ssrd (Surface solar radiation downwards)\n",
                )),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn info_from_standard_input() -> Result<(), Box<dyn std::error::Error>> {
    let data = utils::gridded_message()?;

    let mut cmd = assert_cmd::Command::cargo_bin(CMD_NAME)?;
    cmd.arg("info").arg("-").write_stdin(data);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Message 0\n"))
        .stderr(predicate::str::is_empty());

    Ok(())
}
