//! Conforma CLI - Command-line interface
//!
//! Commands:
//!   run     - Run all fixture cases against a transform
//!   check   - Validate fixture pairing without running anything
//!   schema  - Print JSON schema for output types

use conforma::*;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("conforma {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
Conforma - Golden-fixture conformance runner

USAGE:
    conforma <COMMAND> [OPTIONS]

COMMANDS:
    run <dir>      Run all fixture cases against the transform
    check <dir>    Validate fixture pairing without running anything
    schema [name]  Print JSON schema for output type
    version        Print version

OPTIONS:
    --transform <cmd>   Collaborator program (overrides conforma.yaml)
    --identity          Use the identity transform (comparator self-check)
    --json              JSON output format

FIXTURES:
    Pairs named <case>_input.<ext> and <case>_output.<ext> in <dir>.
    Extensions carry the source/target language tags. A conforma.yaml in
    <dir> can name the transform and filter cases.

EXAMPLES:
    conforma run tests/files --transform ./migrate
    conforma run tests/files --identity --json
    conforma check tests/files
"#
    );
}

fn cmd_run(args: &[String]) -> Result<()> {
    let dir = positional_arg(args)
        .ok_or("Usage: conforma run <dir> [--transform <cmd>] [--identity] [--json]")?;
    let dir = Path::new(dir);

    let json_output = args.contains(&"--json".to_string());
    let identity = args.contains(&"--identity".to_string());

    let config = RunConfig::load_from_dir(dir)?.unwrap_or_default();

    let transform: Box<dyn Transform> = if identity {
        Box::new(Identity)
    } else {
        let program = parse_transform_arg(args)
            .or_else(|| config.transform.clone())
            .ok_or_else(|| {
                Error::Config(
                    "No transform configured. Pass --transform <cmd> or set 'transform' in conforma.yaml (or use --identity)."
                        .to_string(),
                )
            })?;
        Box::new(CommandTransform::new(program).with_args(config.args.clone()))
    };

    let report = Runner::with_config(config).run(dir, transform.as_ref())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_report());
    }

    if report.passed() {
        Ok(())
    } else {
        Err("Conformance run failed".into())
    }
}

fn cmd_check(args: &[String]) -> Result<()> {
    let dir = positional_arg(args).ok_or("Usage: conforma check <dir>")?;

    let pairs = discover(Path::new(dir))?;

    for pair in &pairs {
        println!(
            "✓ {}: {} → {}",
            pair.case, pair.input.lang, pair.expected.lang
        );
    }
    println!("\n{} fixture pair(s), pairing intact", pairs.len());
    Ok(())
}

fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match schema_name {
        "list" => {
            println!("Available schemas: run, case, config");
            Ok(())
        }
        "run" => print_schema::<RunReport>(),
        "case" => print_schema::<CaseResult>(),
        "config" => print_schema::<RunConfig>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// First positional argument, skipping flags and their values
fn positional_arg(args: &[String]) -> Option<&String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--transform" || arg == "-t" {
            skip_next = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(arg);
    }
    None
}

fn parse_transform_arg(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--transform" || arg == "-t" {
            if let Some(cmd) = args.get(i + 1) {
                return Some(cmd.clone());
            }
        }
    }
    None
}
