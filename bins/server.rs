use std::process::ExitCode;

use common::utils::lifecycle::ProcessContext;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::info;

fn main() -> ExitCode {
    // .env first so RUST_LOG, PORT and DATABASE_URL can come from it
    dotenv().ok();

    let ctx = ProcessContext::new("server", env!("CARGO_PKG_VERSION"));

    let cfg = AppConfig::load_and_validate();
    let format = cfg.as_ref().map(|c| c.logging.format).unwrap_or_default();
    init_logging(format);
    ctx.info("logger_init", &format!("tracing subscriber initialized ({format:?})"));

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            ctx.error("config_invalid", &format!("{e:#}"), "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    std::panic::set_hook(Box::new(move |info| {
        ctx.error("panic", info, "unhandled panic occurred");
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            ctx.error("runtime_build_failed", &e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = ctx.service,
        event = "start",
        service_id = %ctx.service_id,
        pid = ctx.pid,
        version = ctx.version,
        threads = worker_threads.unwrap_or_default(),
        port = cfg.server.port.unwrap_or_default(),
        "server service starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            let res = server::run(cfg).await;
            if let Err(e) = &res {
                ctx.error("run_failed", &format!("{e:#}"), "server::run returned error");
            }
            res
        });

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        ctx.info("stop", "server stopped normally");
                        ExitCode::SUCCESS
                    }
                    // already logged by the task
                    Ok(Err(_)) => ExitCode::FAILURE,
                    Err(e) => {
                        ctx.error("task_join_error", &e, "server task join error");
                        ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                ctx.info("shutdown_signal", "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
