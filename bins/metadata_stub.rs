use tracing::{error, info};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match configs::AppConfig::load_for_stub() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "metadata_stub", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging.level, cfg.logging.is_json());

    let addr = match cfg.stub.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(service = "metadata_stub", event = "bind_addr_invalid", error = %e, "invalid stub address");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "metadata_stub", event = "start", %addr, "metadata stub starting");
    tokio::select! {
        res = server::metadata_stub::run(addr) => match res {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(e) => {
                error!(service = "metadata_stub", event = "run_failed", error = %e, "metadata stub stopped");
                std::process::ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!(service = "metadata_stub", event = "shutdown_signal", "received Ctrl+C, shutting down");
            std::process::ExitCode::SUCCESS
        }
    }
}
