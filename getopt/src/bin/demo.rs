// Demo runner walking through the classic getopt usage patterns: short
// options, long options, mixed scanning with a "--" terminator, and
// silent-mode error handling.

use getopt::{ConfigError, ErrorOpt, LongOpt, OptionTable, ParsedOpt, Parser};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    demo_short_options(&argv(&[
        "-v",
        "-n",
        "42",
        "-o",
        "output.txt",
        "file1.txt",
        "file2.txt",
    ]))?;
    demo_long_options(&argv(&[
        "--verbose",
        "--number",
        "42",
        "--output",
        "output.txt",
        "file1.txt",
    ]))?;
    demo_mixed_options(&argv(&["-v", "--output", "output.txt", "--", "-n", "42"]))?;
    demo_silent_errors(&argv(&["-v", "-x", "-n"]))?;
    Ok(())
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Basic short options: -v (flag), -n NUM, -o FILE.
fn demo_short_options(args: &[String]) -> Result<(), ConfigError> {
    println!("\nDemo 1: short options");
    println!("command: program {}", args.join(" "));

    let table = OptionTable::build("vn:o:", Vec::new())?;
    let mut parser = Parser::new(args, &table);

    let mut verbose = false;
    let mut number: i32 = 0;
    let mut output: Option<String> = None;

    loop {
        match parser.next() {
            ParsedOpt::Opt(c, _) if c == 'v' as i32 => verbose = true,
            ParsedOpt::Opt(c, Some(v)) if c == 'n' as i32 => match v.parse() {
                Ok(n) => number = n,
                Err(_) => {
                    eprintln!("error: -n requires a numeric argument");
                    return Ok(());
                }
            },
            ParsedOpt::Opt(c, Some(v)) if c == 'o' as i32 => output = Some(v.to_string()),
            ParsedOpt::End => break,
            // Diagnostic already printed by the parser.
            _ => return Ok(()),
        }
    }

    println!("parsed values:");
    println!("  verbose: {}", verbose);
    println!("  number: {}", number);
    println!("  output file: {:?}", output);
    println!("  input files: {:?}", parser.remaining());
    Ok(())
}

/// The same program surface through long options only.
fn demo_long_options(args: &[String]) -> Result<(), ConfigError> {
    println!("\nDemo 2: long options");
    println!("command: program {}", args.join(" "));

    let table = OptionTable::build(
        "vn:o:",
        vec![
            LongOpt::new("verbose", 'v' as i32),
            LongOpt::new("number", 'n' as i32).required_arg(),
            LongOpt::new("output", 'o' as i32).required_arg(),
        ],
    )?;
    let mut parser = Parser::new(args, &table);

    let mut verbose = false;
    let mut number: i32 = 0;
    let mut output: Option<String> = None;

    loop {
        match parser.next() {
            ParsedOpt::Opt(c, _) if c == 'v' as i32 => verbose = true,
            ParsedOpt::Opt(c, Some(v)) if c == 'n' as i32 => number = v.parse().unwrap_or(0),
            ParsedOpt::Opt(c, Some(v)) if c == 'o' as i32 => output = Some(v.to_string()),
            ParsedOpt::End => break,
            _ => return Ok(()),
        }
    }

    println!("parsed values:");
    println!("  verbose: {}", verbose);
    println!("  number: {}", number);
    println!("  output file: {:?}", output);
    println!("  input files: {:?}", parser.remaining());
    Ok(())
}

/// Short and long options mixed, with "--" terminating the scan.
fn demo_mixed_options(args: &[String]) -> Result<(), ConfigError> {
    println!("\nDemo 3: mixed short and long options, with --");
    println!("command: program {}", args.join(" "));

    let table = OptionTable::build(
        "vn:",
        vec![LongOpt::new("output", 'o' as i32).required_arg()],
    )?;
    let mut parser = Parser::new(args, &table);

    loop {
        match parser.next() {
            ParsedOpt::Opt(c, _) if c == 'v' as i32 => println!("found -v"),
            ParsedOpt::Opt(c, Some(v)) if c == 'n' as i32 => {
                println!("found -n with value: {}", v)
            }
            ParsedOpt::Opt(c, Some(v)) if c == 'o' as i32 => {
                println!("found --output with value: {}", v)
            }
            ParsedOpt::End => break,
            _ => {}
        }
    }

    println!("remaining arguments (after --):");
    for arg in parser.remaining() {
        println!("  {}", arg);
    }
    Ok(())
}

/// Leading ':' in the optstring plus disabled reporting: the caller owns
/// all error output and can tell a missing argument from an unknown option.
fn demo_silent_errors(args: &[String]) -> Result<(), ConfigError> {
    println!("\nDemo 4: silent error handling");
    println!("command: program {}", args.join(" "));

    let table = OptionTable::build(":vn:", Vec::new())?;
    let mut parser = Parser::new(args, &table);
    parser.set_error_reporting(false);

    loop {
        match parser.next() {
            ParsedOpt::Opt(c, _) if c == 'v' as i32 => println!("verbose mode enabled"),
            ParsedOpt::Opt(c, Some(v)) if c == 'n' as i32 => println!("number set to: {}", v),
            ParsedOpt::MissingArg(opt) => println!("missing argument for option {}", opt),
            ParsedOpt::Unknown(ErrorOpt::Short(c)) => println!("unknown option -{}", c),
            ParsedOpt::Unknown(ErrorOpt::Long(name)) => println!("unknown option --{}", name),
            ParsedOpt::End => break,
            _ => {}
        }
    }

    if parser.has_option('v') {
        println!("the verbose option was specified");
    }
    Ok(())
}
