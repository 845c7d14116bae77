use std::{env, fs::read_to_string, process::exit, time::Instant};

use compact_parser::{
    display_diagnostic,
    errors::errors::Severity,
    limits::ParserLimits,
    parser::parser::parse_with_limits,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: compact-parser <file>");
        exit(2);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            exit(2);
        }
    };

    let limits = match ParserLimits::from_project_toml("project.toml") {
        Ok(limits) => limits,
        Err(error) => {
            eprintln!("{}", error);
            exit(2);
        }
    };

    let start = Instant::now();

    let result = parse_with_limits(&source, Some(String::from(file_name)), limits);

    let (program, diagnostics) = match result {
        Ok(parsed) => parsed,
        Err(fatal) => {
            // Only the nesting-depth guard aborts a parse outright.
            display_diagnostic(&fatal.into_diagnostic(), &source);
            exit(1);
        }
    };

    println!("Parsed in {:?}", start.elapsed());

    for diagnostic in &diagnostics {
        display_diagnostic(diagnostic, &source);
    }

    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();

    println!(
        "{}: {} top-level element(s), {} diagnostic(s)",
        file_name,
        program.pelts.len(),
        diagnostics.len()
    );

    if error_count > 0 {
        exit(1);
    }
}
