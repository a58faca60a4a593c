use log::error;
use std::process::ExitCode;
use timetable_solver::config::ServerConfig;
use timetable_solver::server;
use timetable_solver::store::Store;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

    let store = match &config.data_path {
        Some(path) => match Store::from_json_file(path) {
            Ok(store) => store,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Store::default(),
    };

    if let Err(e) = server::run_server(&config.bind_addr(), store).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
