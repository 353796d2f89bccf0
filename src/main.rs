use diabetes_eda::analysis;
use diabetes_eda::config::AnalysisConfig;
use env_logger::{Builder, Env};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::default();
    match analysis::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
