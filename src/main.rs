use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use stackword::{Env, Limits};

/// Evaluate stackword source and print the final stack
#[derive(Parser)]
#[command(name = "stackword")]
struct Args {
    /// Source files, evaluated in order as one session; stdin if none
    files: Vec<PathBuf>,

    /// Give up after this many word expansions per token
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&args.log_level)
    ).init();

    let mut lines = Vec::new();
    if args.files.is_empty() {
        for line in io::stdin().lock().lines() {
            lines.push(line.context("reading stdin")?);
        }
    } else {
        for path in &args.files {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            lines.extend(source.lines().map(str::to_owned));
        }
    }

    let mut env = Env::with_limits(Limits {
        max_expansions: args.max_expansions,
    });

    let result = lines.iter()
        .try_for_each(|line| env.eval_line(line))
        .and_then(|()| env.finish());

    match result {
        Ok(()) => {
            println!("{}", env);
            Ok(ExitCode::SUCCESS)
        },

        Err(err) => {
            eprintln!("error: {}", err);
            Ok(ExitCode::FAILURE)
        },
    }
}
