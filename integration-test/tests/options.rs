//! End-to-end scans over realistic argument vectors.

use getopt::{ErrorOpt, LongOpt, OptionTable, ParsedOpt, Parser};
use test_driver::{argv, scan, scan_with, OwnedResult};

// -- whole-command-line scans --

#[test]
fn typical_command_line() {
    let args = argv(&["-v", "-n", "42", "-o", "output.txt", "file1.txt", "file2.txt"]);
    let table = OptionTable::build("vn:o:", Vec::new()).unwrap();
    let out = scan(&args, &table);
    assert_eq!(
        out.results,
        vec![
            OwnedResult::opt('v', None),
            OwnedResult::opt('n', Some("42")),
            OwnedResult::opt('o', Some("output.txt")),
        ]
    );
    assert_eq!(out.final_index, 5);
    assert_eq!(out.remaining, argv(&["file1.txt", "file2.txt"]));
    assert!(out.diagnostics.is_empty());
}

#[test]
fn clustered_equivalent_of_separate_flags() {
    let table = OptionTable::build("abo:", Vec::new()).unwrap();
    let packed = scan(&argv(&["-abofile"]), &table);
    let spread = scan(&argv(&["-a", "-b", "-o", "file"]), &table);
    assert_eq!(packed.results, spread.results);
    assert!(packed.remaining.is_empty());
    assert!(spread.remaining.is_empty());
}

#[test]
fn attached_and_detached_argument_forms() {
    let table = OptionTable::build("o:", Vec::new()).unwrap();

    let attached = scan(&argv(&["-ovalue"]), &table);
    assert_eq!(attached.results, vec![OwnedResult::opt('o', Some("value"))]);
    assert_eq!(attached.final_index, 1);

    let detached = scan(&argv(&["-o", "value"]), &table);
    assert_eq!(detached.results, vec![OwnedResult::opt('o', Some("value"))]);
    assert_eq!(detached.final_index, 2);
}

#[test]
fn double_dash_excluded_from_remaining() {
    let args = argv(&["-v", "--", "-n", "42"]);
    let table = OptionTable::build("vn:", Vec::new()).unwrap();
    let out = scan(&args, &table);
    assert_eq!(out.results, vec![OwnedResult::opt('v', None)]);
    assert_eq!(out.remaining, argv(&["-n", "42"]));
}

#[test]
fn scan_stops_at_first_non_option() {
    let args = argv(&["-v", "file.txt"]);
    let table = OptionTable::build("v", Vec::new()).unwrap();
    let out = scan(&args, &table);
    assert_eq!(out.results, vec![OwnedResult::opt('v', None)]);
    assert_eq!(out.final_index, 1);
    assert_eq!(out.remaining, argv(&["file.txt"]));
}

#[test]
fn unknown_cluster_char_is_isolated() {
    let args = argv(&["-vx"]);
    let table = OptionTable::build("v", Vec::new()).unwrap();
    let out = scan_with(&args, &table, false);
    assert_eq!(
        out.results,
        vec![
            OwnedResult::opt('v', None),
            OwnedResult::Unknown(ErrorOpt::Short('x')),
        ]
    );
    assert_eq!(out.final_index, 1);
}

// -- silent vs loud missing arguments --

#[test]
fn silent_mode_changes_sentinel_not_progress() {
    let args = argv(&["-n"]);

    let loud = OptionTable::build("n:", Vec::new()).unwrap();
    let out = scan_with(&args, &loud, false);
    assert_eq!(out.results, vec![OwnedResult::Unknown(ErrorOpt::Short('n'))]);
    assert_eq!(out.final_index, 1);

    let silent = OptionTable::build(":n:", Vec::new()).unwrap();
    let out = scan(&args, &silent);
    assert_eq!(
        out.results,
        vec![OwnedResult::MissingArg(ErrorOpt::Short('n'))]
    );
    assert_eq!(out.final_index, 1);
    // Silent mode prints nothing even with reporting enabled.
    assert!(out.diagnostics.is_empty());
}

// -- long options --

fn long_table() -> OptionTable {
    OptionTable::build(
        "vn:",
        vec![
            LongOpt::new("verbose", 'v' as i32),
            LongOpt::new("number", 'n' as i32).required_arg(),
            LongOpt::new("output", 'o' as i32).required_arg(),
        ],
    )
    .unwrap()
}

#[test]
fn long_equals_and_next_token_syntax() {
    let table = long_table();

    let inline = scan(&argv(&["--output=o.txt"]), &table);
    assert_eq!(inline.results, vec![OwnedResult::opt('o', Some("o.txt"))]);
    assert_eq!(inline.final_index, 1);

    let split = scan(&argv(&["--output", "o.txt"]), &table);
    assert_eq!(split.results, vec![OwnedResult::opt('o', Some("o.txt"))]);
    assert_eq!(split.final_index, 2);
}

#[test]
fn mixed_short_and_long_scan() {
    let args = argv(&["-v", "--output", "out.txt", "--number=7", "positional"]);
    let out = scan(&args, &long_table());
    assert_eq!(
        out.results,
        vec![
            OwnedResult::opt('v', None),
            OwnedResult::opt('o', Some("out.txt")),
            OwnedResult::opt('n', Some("7")),
        ]
    );
    assert_eq!(out.remaining, argv(&["positional"]));
}

#[test]
fn exact_long_names_only_no_abbreviation() {
    let out = scan_with(&argv(&["--out"]), &long_table(), false);
    assert_eq!(
        out.results,
        vec![OwnedResult::Unknown(ErrorOpt::Long("out".to_string()))]
    );
}

#[test]
fn long_index_tracks_matches() {
    let args = argv(&["--number", "3", "--verbose"]);
    let table = long_table();
    let mut parser = Parser::new(&args, &table);
    assert_eq!(parser.next(), ParsedOpt::Opt('n' as i32, Some("3")));
    assert_eq!(parser.long_index(), Some(1));
    assert_eq!(parser.next(), ParsedOpt::Opt('v' as i32, None));
    assert_eq!(parser.long_index(), Some(0));
}

// -- diagnostics --

#[test]
fn loud_mode_reports_each_error_kind() {
    let table = long_table();
    let unknown_long = scan(&argv(&["--bogus"]), &table);
    assert!(unknown_long.diagnostics.contains("bogus"));

    let missing = scan(&argv(&["--output"]), &table);
    assert!(missing.diagnostics.contains("output"));

    let unknown_short = scan(&argv(&["-z"]), &table);
    assert!(unknown_short.diagnostics.contains('z'));
}

#[test]
fn reporting_toggle_is_pure_side_channel() {
    let args = argv(&["-z", "-n"]);
    let table = OptionTable::build("n:", Vec::new()).unwrap();
    let loud = scan(&args, &table);
    let quiet = scan_with(&args, &table, false);
    // Same returned values and progress either way.
    assert_eq!(loud.results, quiet.results);
    assert_eq!(loud.final_index, quiet.final_index);
    assert!(!loud.diagnostics.is_empty());
    assert!(quiet.diagnostics.is_empty());
}

// -- session independence --

#[test]
fn independent_parsers_share_one_table() {
    let table = OptionTable::build("vn:", Vec::new()).unwrap();
    let a = argv(&["-v"]);
    let b = argv(&["-n", "1", "x"]);
    let mut pa = Parser::new(&a, &table);
    let mut pb = Parser::new(&b, &table);
    assert_eq!(pa.next(), ParsedOpt::Opt('v' as i32, None));
    assert_eq!(pb.next(), ParsedOpt::Opt('n' as i32, Some("1")));
    assert_eq!(pa.next(), ParsedOpt::End);
    assert_eq!(pb.next(), ParsedOpt::End);
    assert!(pa.has_option('v'));
    assert!(!pb.has_option('v'));
    assert_eq!(pb.remaining().to_vec(), argv(&["x"]));
}
