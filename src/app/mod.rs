mod wiring;

use crate::{cli, context, storage, web};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<Self> {
        let cli = cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.log_file.as_deref());
        log::info!("🚀 Starting personal library");
        log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
        log::info!("🗄️ Database: {}", ctx.db_path().to_string_lossy());
        if let Some(path) = ctx.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok(Self { ctx, storage })
    }
}

pub async fn run_server(app: App) -> Result<()> {
    let shutdown = CancellationToken::new();

    let addr = app.ctx.listen;
    let web_shutdown = shutdown.clone();
    let mut web_handle = tokio::spawn(async move {
        if let Err(e) = web::serve(addr, app.storage, web_shutdown).await {
            log::error!("Web server error: {:#}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
        }
        _ = &mut web_handle => {
            log::error!("Web server exited unexpectedly");
        }
    }

    shutdown.cancel();
    // A finished JoinHandle must not be polled again.
    if !web_handle.is_finished() {
        web_handle.await.context("joining web server task")?;
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let app = App::from_cli()?;
    run_server(app).await
}
