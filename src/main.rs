use std::sync::Arc;

use memories_server::auth::SessionCookieAuth;
use memories_server::config::{AppState, Config};
use memories_server::{logger, server, site};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let router = site::router()?;
    logger::log_server_start(&addr, &cfg, router.len());

    let auth = SessionCookieAuth::new(cfg.auth.session_cookie.clone());
    let state = Arc::new(AppState::new(cfg, router, auth));

    server::serve(listener, state, server::ctrl_c()).await?;
    logger::log_info("Server stopped");
    Ok(())
}
