use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use fleet_maintenance::config::{DatabaseConfig, EnvironmentConfig};
use fleet_maintenance::{create_router, database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging; RUST_LOG tiene prioridad sobre LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🔧 Fleet Maintenance API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let pool = match database::create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    if config.run_migrations {
        database::run_migrations(&pool).await?;
    } else {
        warn!("⏭️ Migraciones desactivadas (RUN_MIGRATIONS=false)");
    }

    if config.cors_origins.is_empty() && config.is_production() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se permite cualquier origen");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🏢 Empresas:");
    info!("   GET|POST /api/companies");
    info!("   GET|PATCH|DELETE /api/companies/:id");
    info!("📍 Ubicaciones:");
    info!("   GET|POST /api/locations");
    info!("   GET|PATCH|DELETE /api/locations/:id");
    info!("🚚 Vehículos:");
    info!("   GET|POST /api/vehicles");
    info!("   GET  /api/vehicles/maintenance/due - Vencimientos próximos");
    info!("   GET|PATCH|DELETE /api/vehicles/:id");
    info!("🧾 Órdenes de servicio:");
    info!("   GET|POST /api/service-orders");
    info!("   GET|PATCH|DELETE /api/service-orders/:id");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
