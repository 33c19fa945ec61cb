/// PI-Sentinel CLI entry point
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::error;
use pi_sentinel::cli::{Cli, Commands, ReportFormat};
use pi_sentinel::repo;
use pi_sentinel::{
    CancelToken, Config, CsvReporter, HtmlReporter, RepositoryInfo, SarifReporter,
    ScanCoordinator, ScanResult, TerminalReporter,
};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Exit code for a user interrupt, per POSIX convention (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                process::exit(0);
            }
            ErrorKind::InvalidSubcommand => {
                eprintln!("Error: unknown command");
                process::exit(1);
            }
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    };

    let command = match cli.command {
        Some(command) => command,
        None => {
            let _ = Cli::command().print_help();
            println!();
            process::exit(0);
        }
    };

    init_logging(&command);

    let code = match command {
        Commands::Scan {
            repo,
            repo_list,
            config,
            output,
            verbose: _,
        } => run_scan(repo, repo_list, config, output),
        Commands::Report {
            input,
            format,
            output,
        } => run_report(input, format, output),
        Commands::Version => run_version(),
    };

    process::exit(code);
}

fn init_logging(command: &Commands) {
    let verbose = matches!(command, Commands::Scan { verbose: true, .. });

    let env_level = std::env::var("LOG_LEVEL").ok();
    let default_level = if verbose {
        "debug".to_string()
    } else {
        match env_level.as_deref() {
            Some(level @ ("debug" | "info" | "warn" | "error")) => level.to_string(),
            _ => "info".to_string(),
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_scan(
    repo_url: Option<String>,
    repo_list: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: PathBuf,
) -> i32 {
    // Exactly one source of repositories
    let urls = match (&repo_url, &repo_list) {
        (Some(url), None) => vec![url.clone()],
        (None, Some(list)) => match repo::read_repo_list(list) {
            Ok(urls) if !urls.is_empty() => urls,
            Ok(_) => {
                eprintln!("Error: repo list is empty: {}", list.display());
                return 1;
            }
            Err(err) => {
                eprintln!("Error: {:#}", err);
                return 1;
            }
        },
        _ => {
            eprintln!("Error: exactly one of --repo or --repo-list is required");
            return 1;
        }
    };

    // Validate every URL up front; a bad URL is fatal
    let mut validated = Vec::with_capacity(urls.len());
    for raw in &urls {
        match repo::validate_repo_url(raw) {
            Ok(url) => validated.push(url),
            Err(err) => {
                eprintln!("Error: {}", err);
                return 1;
            }
        }
    }

    let config = match config_path {
        Some(path) => match Config::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {:#}", err);
                return 1;
            }
        },
        None => Config::load_default(),
    };
    let config = Arc::new(config);

    let coordinator = ScanCoordinator::new(Arc::clone(&config));
    let cancel = coordinator.cancel_token();
    install_interrupt_handler(cancel.clone());

    let mut results: Vec<ScanResult> = Vec::new();
    let reporter = TerminalReporter::new();

    for url in &validated {
        if cancel.is_cancelled() {
            break;
        }

        let checkout = match repo::clone_repository(url, &config.github) {
            Ok(path) => path,
            Err(err) => {
                error!("clone failed for {}: {:#}", url, err);
                if validated.len() == 1 {
                    eprintln!("Error: {:#}", err);
                    return 1;
                }
                continue;
            }
        };

        let repository = RepositoryInfo {
            url: url.to_string(),
            local_path: checkout.clone(),
            file_count: 0,
            size: 0,
        };

        let scan = coordinator.scan(repository, &checkout);
        repo::cleanup_clone(&checkout);

        match scan {
            Ok(result) => {
                reporter.report(&result);
                results.push(result);
            }
            Err(err) => {
                eprintln!("Error: {:#}", err);
                return 1;
            }
        }
    }

    let write = if results.len() == 1 {
        ScanCoordinator::write_results(&results[0], &output)
    } else {
        serde_json::to_string_pretty(&results)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&output, json).map_err(anyhow::Error::from))
    };

    if let Err(err) = write {
        eprintln!("Error: {:#}", err);
        return 1;
    }
    println!("Results written to {}", output.display());

    if cancel.is_cancelled() {
        EXIT_INTERRUPTED
    } else {
        0
    }
}

fn install_interrupt_handler(cancel: CancelToken) {
    if let Err(err) = ctrlc::set_handler(move || {
        eprintln!("\ninterrupt received; finishing in-flight files...");
        cancel.cancel();
    }) {
        error!("failed to install interrupt handler: {}", err);
    }
}

fn run_report(input: PathBuf, format: ReportFormat, output: Option<PathBuf>) -> i32 {
    let contents = match std::fs::read_to_string(&input) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Error: cannot read {}: {}", input.display(), err);
            return 1;
        }
    };

    let result: ScanResult = match serde_json::from_str(&contents) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error: {} is not a scan artefact: {}", input.display(), err);
            return 1;
        }
    };

    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!("pi-sentinel-report.{}", format.extension()))
    });

    let rendered = match format {
        ReportFormat::Html => HtmlReporter::new().write_to_file(&result, &output),
        ReportFormat::Csv => CsvReporter::new().write_to_file(&result, &output),
        ReportFormat::Sarif => SarifReporter::new().write_to_file(&result, &output),
    };

    match rendered {
        Ok(()) => {
            println!("Report written to {}", output.display());
            0
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn run_version() -> i32 {
    println!("pi-sentinel {}", pi_sentinel::VERSION);
    println!(
        "  commit:   {}",
        option_env!("BUILD_COMMIT").unwrap_or("unknown")
    );
    println!(
        "  built:    {}",
        option_env!("BUILD_DATE").unwrap_or("unknown")
    );
    println!("  runtime:  rust");
    println!(
        "  platform: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    0
}
