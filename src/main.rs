use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use batch_rename::config::AppConfig;
use batch_rename::logging;
use batch_rename::store::{FileSource, FileStore};
use batch_rename::tui::{App, run_tui};

struct CliArgs {
    config: Option<PathBuf>,
    pattern: Option<String>,
    paths: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs {
        config: None,
        pattern: None,
        paths: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = iter.next().context("--config needs a path")?;
                cli.config = Some(PathBuf::from(value));
            }
            "--pattern" | "-p" => {
                let value = iter.next().context("--pattern needs a value")?;
                cli.pattern = Some(value.clone());
            }
            _ => cli.paths.push(PathBuf::from(arg)),
        }
    }

    Ok(cli)
}

fn print_usage(program: &str) {
    println!("Usage: {program} [--config <file>] [--pattern <pattern>] <file or folder>...");
    println!();
    println!("Pattern tokens: {{name}} original name, {{n}} number, {{ext}} extension");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("batch-rename");

    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        print_usage(program);
        return Ok(());
    }

    let cli = parse_args(args.get(1..).unwrap_or_default())?;

    let mut config = AppConfig::discover(cli.config.as_deref())?;
    if let Some(pattern) = cli.pattern {
        config.pattern = pattern;
    }

    if let Err(e) = logging::init(config.log_file.as_deref(), &config.log_level) {
        eprintln!("Logging disabled: {e}");
    }

    let mut store = FileStore::new(config.rename_config())?;
    let added = store.add_paths(&cli.paths);
    tracing::info!(
        "Starting with {} of {} path argument(s) loaded as {} file(s)",
        added,
        cli.paths.len(),
        store.files().len()
    );

    let app = App::new(store, config.layout_policy());
    run_tui(app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&strings(&["-p", "img_{n}", "a.jpg", "--config", "c.json", "dir"]))
            .unwrap();
        assert_eq!(cli.pattern.as_deref(), Some("img_{n}"));
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.paths, [PathBuf::from("a.jpg"), PathBuf::from("dir")]);
    }

    #[test]
    fn test_parse_args_missing_value() {
        assert!(parse_args(&strings(&["--pattern"])).is_err());
    }
}
