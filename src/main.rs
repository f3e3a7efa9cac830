//! Not-To-Do List 服务入口

use tokio::net::TcpListener;
use tracing::{error, info};

use not_todo::app::{api_router, AppState};
use not_todo::infrastructure::config::{AppConfig, StoreBackend};
use not_todo::infrastructure::logger::Logger;
use not_todo::infrastructure::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::init();

    let config = AppConfig::from_env();
    info!("Starting not-to-do server...");
    match config.backend {
        StoreBackend::Postgres => {
            info!("Backend: postgres ({})", config.masked_database_url())
        }
        StoreBackend::Supabase => info!("Backend: supabase ({})", config.supabase_url),
        StoreBackend::Memory => info!("Backend: memory (non-persistent)"),
    }

    let store = store::connect(&config).await.map_err(|e| {
        error!("Failed to initialize store: {}", e);
        e
    })?;

    let state = AppState::new(store);
    let app = api_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Not-to-do server running on http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /health              - Health check");
    info!("   GET    /api/users?email=    - Find or create user");
    info!("   POST   /api/users           - Find or create user");
    info!("   GET    /api/tasks?userId=   - List tasks (newest first)");
    info!("   POST   /api/tasks           - Create task");
    info!("   PUT    /api/tasks           - Update task (partial)");
    info!("   DELETE /api/tasks?id=       - Delete task");

    axum::serve(listener, app).await?;

    Ok(())
}
