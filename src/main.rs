//! VoxStudio - 语音合成工作台后端
//!
//! - Domain: 变体、参数、对话、编码
//! - Application: 适配、组装、归一化、生命周期
//! - Infrastructure: http, memory, adapters, events

use std::sync::Arc;

use voxstudio::application::SpeechTransportPort;
use voxstudio::config::{load_config, print_config};
use voxstudio::infrastructure::adapters::{FakeSpeechClient, HttpSpeechClient, HttpSpeechClientConfig};
use voxstudio::infrastructure::events::EventPublisher;
use voxstudio::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voxstudio::infrastructure::memory::InMemoryAudioStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voxstudio={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("VoxStudio - 语音合成工作台");
    print_config(&config);

    // 推理客户端
    let transport: Arc<dyn SpeechTransportPort> = if config.inference.fake {
        Arc::new(FakeSpeechClient::new())
    } else {
        let client_config = HttpSpeechClientConfig::new(&config.inference.url)
            .with_api_key(&config.inference.api_key)
            .with_timeout(config.inference.timeout_secs);
        Arc::new(HttpSpeechClient::new(client_config)?)
    };

    if !transport.health_check().await {
        tracing::warn!(
            url = %config.inference.url,
            "Inference service not reachable at startup, requests will fail until it is up"
        );
    }

    // 音频资源表与事件发布器
    let resources = Arc::new(InMemoryAudioStore::new());
    let event_publisher = Arc::new(EventPublisher::new());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_upload_bytes(config.server.max_upload_bytes);
    let state = AppState::new(transport, resources, event_publisher);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
