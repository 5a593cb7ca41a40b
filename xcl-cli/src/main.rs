//! `xcl` - parse an XCL document from stdin.
//!
//! Usage:
//!   xcl < config.xcl            # pretty JSON of the value tree
//!   xcl --compact < config.xcl  # single-line JSON
//!   xcl --tokens < config.xcl   # one lexeme per line
//!
//! Set `RUST_LOG=xcl_core=trace` to see skipped characters.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "xcl", about = "Parse an XCL document from stdin", version)]
struct Args {
    /// Print the token stream instead of the parsed value
    #[arg(long)]
    tokens: bool,

    /// Print JSON on a single line
    #[arg(long, conflicts_with = "tokens")]
    compact: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("xcl: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, mut input: impl Read, mut out: impl Write) -> Result<()> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .context("reading stdin")?;
    debug!(bytes = source.len(), "read input");

    if args.tokens {
        for lexeme in xcl_core::lex(&source) {
            let lexeme = lexeme.map_err(|err| located(err, &source))?;
            writeln!(out, "{:>12}  {}", lexeme.span.to_string(), lexeme.token)?;
        }
        return Ok(());
    }

    let value = xcl_core::loads(&source).map_err(|err| located(err, &source))?;
    if args.compact {
        serde_json::to_writer(&mut out, &value)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Attach `line:column` to a parse failure.
fn located(err: xcl_core::Error, source: &str) -> anyhow::Error {
    let (line, column) = err.span().line_col(source);
    anyhow::Error::new(err).context(format!("stdin:{line}:{column}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: Args, input: &str) -> Result<String> {
        let mut out = Vec::new();
        run(&args, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    const DOC: &str = "name = \"foo\"\nls = [1 2]\n";

    #[test]
    fn test_pretty_json_by_default() {
        let out = render(Args::parse_from(["xcl"]), DOC).unwrap();
        assert_eq!(
            out,
            "{\n  \"name\": \"foo\",\n  \"ls\": [\n    1,\n    2\n  ]\n}\n"
        );
    }

    #[test]
    fn test_compact_json() {
        let out = render(Args::parse_from(["xcl", "--compact"]), DOC).unwrap();
        assert_eq!(out, "{\"name\":\"foo\",\"ls\":[1,2]}\n");
    }

    #[test]
    fn test_token_dump() {
        let out = render(Args::parse_from(["xcl", "--tokens"]), "k = 1.5").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "        0..1  identifier `k`",
                "        2..3  `=`",
                "        4..7  float 1.5",
            ]
        );
    }

    #[test]
    fn test_tokens_conflicts_with_compact() {
        assert!(Args::try_parse_from(["xcl", "--tokens", "--compact"]).is_err());
    }

    #[test]
    fn test_parse_error_is_located() {
        let err = render(Args::parse_from(["xcl"]), "a = 1\nb = [1,\n  }").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("stdin:3:3: "), "{message}");
        assert!(err.downcast_ref::<xcl_core::Error>().is_some());
    }

    #[test]
    fn test_lex_error_is_located_in_token_mode() {
        let err = render(Args::parse_from(["xcl", "--tokens"]), "a = \"é\\q\"").unwrap_err();
        assert!(format!("{err:#}").starts_with("stdin:1:7: "));
    }
}
