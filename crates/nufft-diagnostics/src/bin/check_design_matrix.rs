// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — check_design_matrix
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Compare NUFFT operators with explicit design matrices and write the
//! comparison figures.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nufft_diagnostics::check::run_check;
use nufft_types::config::CheckConfig;
use nufft_types::error::NufftResult;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "check_design_matrix=info,nufft_diagnostics=info";

#[derive(Parser, Debug)]
#[command(version, about = "Check NUFFT operators against explicit design matrices")]
struct Args {
    /// JSON configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for figures and reports (overrides the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> NufftResult<CheckConfig> {
    let mut config = match &args.config {
        Some(path) => CheckConfig::from_file(path)?,
        None => CheckConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.display().to_string();
    }
    Ok(config)
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match load_config(&args).and_then(|config| run_check(&config)) {
        Ok(reports) => {
            let failed = reports.iter().filter(|r| !r.passed()).count();
            info!(cases = reports.len(), failed, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "design-matrix check failed");
            ExitCode::FAILURE
        }
    }
}
