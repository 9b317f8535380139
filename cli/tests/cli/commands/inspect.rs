use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

macro_rules! test_inspect {
    ($(($name:ident, $input:expr, $options:expr, $expected_stdout:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = $input;

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("inspect").args($options).arg(input.path());
            cmd.assert()
                .success()
                .stdout(predicate::str::diff($expected_stdout))
                .stderr(predicate::str::is_empty());

            Ok(())
        }
    )*);
}

test_inspect! {
    (
        inspecting_sections,
        utils::two_messages()?,
        vec!["-s"],
        "    0 │ 0000000000000000 - 0000000000000008 │ Section 0 (Indicator Section)
    0 │ 0000000000000008 - 0000000000000024 │ Section 1 (Product Definition Section)
    0 │ 0000000000000024 - 0000000000000044 │ Section 2 (Grid Description Section)
    0 │ 0000000000000044 - 0000000000000053 │ Section 4 (Binary Data Section)
    0 │ 0000000000000053 - 0000000000000057 │ Section 5 (End Section)
    1 │ 0000000000000059 - 0000000000000061 │ Section 0 (Indicator Section)
    1 │ 0000000000000061 - 000000000000007d │ Section 1 (Product Definition Section)
    1 │ 000000000000007d - 0000000000000090 │ Section 4 (Binary Data Section)
    1 │ 0000000000000090 - 0000000000000094 │ Section 5 (End Section)
"
    ),
    (
        inspecting_messages,
        utils::two_messages()?,
        vec!["-m"],
        "   id │           offset   length │ GDS BMS │ grid type
    0 │ 0000000000000000       87 │ yes   - │ regular_ll
    1 │ 0000000000000059       59 │   -   - │ -
"
    ),
    (
        inspecting_messages_with_skipped_edition2,
        utils::with_edition2()?,
        vec!["-m"],
        "   id │           offset   length │ GDS BMS │ grid type
    0 │ 0000000000000000       87 │ yes   - │ regular_ll
    - │ 0000000000000057       20 │ skipped GRIB edition 2
"
    ),
    (
        inspecting_everything,
        utils::with_bitmap()?,
        Vec::<&str>::new(),
        "Sections:
    0 │ 0000000000000000 - 0000000000000008 │ Section 0 (Indicator Section)
    0 │ 0000000000000008 - 0000000000000024 │ Section 1 (Product Definition Section)
    0 │ 0000000000000024 - 0000000000000044 │ Section 2 (Grid Description Section)
    0 │ 0000000000000044 - 000000000000004b │ Section 3 (Bit Map Section)
    0 │ 000000000000004b - 0000000000000058 │ Section 4 (Binary Data Section)
    0 │ 0000000000000058 - 000000000000005c │ Section 5 (End Section)

Messages:
   id │           offset   length │ GDS BMS │ grid type
    0 │ 0000000000000000       92 │ yes yes │ regular_ll
"
    ),
}
