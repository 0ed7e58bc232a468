use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser, Subcommand};
use pageshell_tools::{check, config::SiteConfig, css, prerender, ToolError};

/// Build tools of the Usable landing page.
#[derive(Parser, Debug)]
#[command(name = "pageshell-build", version, about)]
struct Cli {
    /// The site root (defaults to `PAGESHELL_SITE_ROOT` or the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// More logs (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minify the site stylesheet
    MinifyCss {
        /// The input stylesheet
        #[arg(long)]
        input: Option<PathBuf>,
        /// The output stylesheet
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check the i18n markers of all pages against the dictionary
    CheckI18n {
        /// Fail if there is any finding
        #[arg(long)]
        strict: bool,
    },
    /// Render a page with its components and translations
    Prerender {
        /// The URL path of the page, e.g. `/fo/pricing`
        path: String,
        /// The output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<bool, ToolError> {
    let config = SiteConfig::load(cli.root.as_deref())?;
    match cli.command {
        Command::MinifyCss { input, output } => {
            let input = input.unwrap_or_else(|| config.css_input.clone());
            let output = output.unwrap_or_else(|| config.css_output.clone());
            let report = css::minify_file(&input, &output)?;
            log::info!("Minified {} into {}", input.display(), output.display());
            println!("{}", report);
            Ok(true)
        }
        Command::CheckI18n { strict } => {
            let findings = check::check_site(&config)?;
            for finding in findings.iter() {
                log::warn!("{}", finding);
            }
            println!("{} finding(s)", findings.len());
            Ok(!strict || findings.is_empty())
        }
        Command::Prerender { path, output } => {
            match output {
                Some(output) => prerender::prerender_to_file(&config, &path, &output)?,
                None => println!("{}", prerender::prerender(&config, &path)?),
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
