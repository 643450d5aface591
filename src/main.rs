use anyhow::{Context, Result};
use cytoscope::config::AppConfig;
use cytoscope::logging;
use cytoscope::service::DiagnosisService;
use cytoscope::ui::cli::drivers::InquireDriver;
use cytoscope::ui::cli::session;
use std::io;
use std::path::PathBuf;

fn main() -> Result<()> {
    if let Err(e) = logging::init() {
        eprintln!("logging disabled: {e}");
    }

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref())
        .context("could not load configuration")?;

    let service = DiagnosisService::from_config(&config).with_context(|| {
        format!(
            "could not start with dataset {} and artifacts {} / {}",
            config.dataset_path.display(),
            config.model_path.display(),
            config.scaler_path.display()
        )
    })?;

    let stdout = io::stdout();
    session::run(&InquireDriver, &service, config.clamp_chart, &mut stdout.lock())
}
