//! flatdb interactive terminal
//!
//! ```bash
//! # Start the REPL against ./mydb
//! flatdb
//!
//! # Execute a single command
//! flatdb --dir data -c "SELECT * FROM users"
//!
//! # Execute commands from a file
//! flatdb -f seed.sql
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use flatdb::sql::engine::{Engine, FileEngine, Output, Session};
use flatdb::sql::types::Row;

/// Command-line interface for flatdb
#[derive(Parser, Debug)]
#[command(name = "flatdb", version, about = "Interactive terminal for flatdb")]
struct Args {
    /// Storage directory
    #[arg(long, default_value = "mydb")]
    dir: PathBuf,

    /// Execute a single command and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Execute commands from file and exit
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Suppress the banner (for scripting)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = FileEngine::open(&args.dir)?.session();

    if let Some(command) = &args.command {
        print_output(session.execute(command));
        Ok(())
    } else if let Some(file) = &args.file {
        let content = std::fs::read_to_string(file)?;
        for statement in content.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() && !statement.starts_with("--") {
                print_output(session.execute(statement));
            }
        }
        Ok(())
    } else {
        repl(&mut session, args.quiet)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("flatdb=debug")
    } else {
        EnvFilter::new("flatdb=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn repl<E: Engine + 'static>(session: &mut Session<E>, quiet: bool) -> Result<()> {
    if !quiet {
        println!("{}", "=".repeat(40));
        println!("flatdb interactive terminal");
        println!("commands: exit, help");
        println!("{}", "=".repeat(40));
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("SQL> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match line.to_lowercase().as_str() {
                    "exit" | "quit" => break,
                    "help" => {
                        print_help();
                        continue;
                    }
                    _ => {}
                }
                print_output(session.execute(line));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("Supported commands:");
    println!("  CREATE TABLE <name> (<col> <type> [PK] [UNIQUE], ...)");
    println!("  INSERT INTO <name> VALUES (<v1>, <v2>, ...)");
    println!("  SELECT <cols> FROM <name> [WHERE <col><op><val>]");
    println!("  SELECT * FROM <t1> JOIN <t2> ON <t1>.<c1> = <t2>.<c2>");
    println!("  UPDATE <name> SET <col>=<val> WHERE <col><op><val>");
    println!("  DELETE FROM <name> WHERE <col><op><val>");
    println!("Operators: = > < (text comparison). exit quits.");
}

fn print_output(output: Output) {
    match output {
        Output::Message(message) => println!("{message}"),
        Output::Rows(rows) if rows.is_empty() => println!("Empty Set"),
        Output::Rows(rows) => {
            print!("{}", render_table(&rows));
            println!("({} rows)", rows.len());
        }
    }
}

/// Renders rows as an aligned ASCII table; columns appear in first-seen
/// order across the result set
fn render_table(rows: &[Row]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (i, column) in columns.iter().enumerate() {
            if let Some(value) = row.get(*column) {
                widths[i] = widths[i].max(value.len());
            }
        }
    }

    let separator = columns
        .iter()
        .enumerate()
        .map(|(i, _)| format!("+{}", "-".repeat(widths[i] + 2)))
        .collect::<String>()
        + "+\n";

    let mut out = separator.clone();
    for (i, column) in columns.iter().enumerate() {
        out.push_str(&format!("| {:<width$} ", column, width = widths[i]));
    }
    out.push_str("|\n");
    out.push_str(&separator);

    for row in rows {
        for (i, column) in columns.iter().enumerate() {
            let value = row.get(*column).map(String::as_str).unwrap_or("");
            out.push_str(&format!("| {:<width$} ", value, width = widths[i]));
        }
        out.push_str("|\n");
    }
    out.push_str(&separator);
    out
}

#[cfg(test)]
mod tests {
    use super::render_table;
    use flatdb::sql::types::Row;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            row(&[("id", "1"), ("name", "Alice")]),
            row(&[("id", "2"), ("name", "Bo")]),
        ];
        let rendered = render_table(&rows);
        assert_eq!(
            rendered,
            "+----+-------+\n\
             | id | name  |\n\
             +----+-------+\n\
             | 1  | Alice |\n\
             | 2  | Bo    |\n\
             +----+-------+\n"
        );
    }

    #[test]
    fn test_render_table_unions_uneven_rows() {
        // An out-of-schema key from an update shows up as its own column
        let rows = vec![
            row(&[("id", "1")]),
            row(&[("id", "2"), ("nickname", "Al")]),
        ];
        let rendered = render_table(&rows);
        assert!(rendered.contains("nickname"));
        assert!(rendered.lines().all(|l| !l.is_empty()));
    }
}
