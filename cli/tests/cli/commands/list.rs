use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

macro_rules! test_list {
    ($(($name:ident, $input:expr, $options:expr, $expected_stdout:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = $input;

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("list").args($options).arg(input.path());
            cmd.assert()
                .success()
                .stdout(predicate::str::diff($expected_stdout))
                .stderr(predicate::str::is_empty());

            Ok(())
        }
    )*);
}

test_list! {
    (
        listing_messages,
        utils::two_messages()?,
        Vec::<&str>::new(),
        "   id │ Parameter                                        Level type    Level          Reference time     Forecast │   #points (nan/total) grid type
    0 │ 10u (Eastward component of the 10m wind)                  1        0 2005-03-09 06:00:00 UTC    acc 0-12h │          0/         4 regular_ll
    1 │ ssrd (Surface solar radiation downwards)                  1        0 2005-03-09 06:00:00 UTC    acc 0-12h │          0/         0 -
"
    ),
    (
        listing_messages_with_bitmap,
        utils::with_bitmap()?,
        Vec::<&str>::new(),
        "   id │ Parameter                                        Level type    Level          Reference time     Forecast │   #points (nan/total) grid type
    0 │ 10v (Northward component of the 10m wind)                 1        0 2005-03-09 06:00:00 UTC    acc 0-12h │          2/         4 regular_ll
"
    ),
    (
        listing_messages_with_bits_set_past_grid_points,
        utils::with_bitmap_set_padding()?,
        Vec::<&str>::new(),
        "   id │ Parameter                                        Level type    Level          Reference time     Forecast │   #points (nan/total) grid type
    0 │ 10v (Northward component of the 10m wind)                 1        0 2005-03-09 06:00:00 UTC    acc 0-12h │          2/         4 regular_ll
"
    ),
    (
        listing_filtered_messages,
        utils::two_messages()?,
        vec!["--filter", "^ssrd"],
        "   id │ Parameter                                        Level type    Level          Reference time     Forecast │   #points (nan/total) grid type
    1 │ ssrd (Surface solar radiation downwards)                  1        0 2005-03-09 06:00:00 UTC    acc 0-12h │          0/         0 -
"
    ),
    (
        listing_with_filter_matching_nothing,
        utils::two_messages()?,
        vec!["-f", "^2t"],
        "   id │ Parameter                                        Level type    Level          Reference time     Forecast │   #points (nan/total) grid type
"
    ),
}

#[test]
fn listing_with_invalid_filter() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("list").args(["-f", "("]).arg(input.path());
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: regex parse error"));

    Ok(())
}

#[test]
fn listing_in_dump_mode() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::two_messages()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("list").arg("-d").arg(input.path());
    cmd.assert()
        .success()
        .stdout(
            predicate::str::starts_with("0\nGrid:                                   regular_ll (0)\n")
                .and(predicate::str::contains(
                    "\n\n1\nGrid:                                   none\n",
                ))
                .and(predicate::str::contains(
                    "  Bits per Value:                       32\n",
                )),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}
