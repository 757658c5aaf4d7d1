use delaygate::config::Config;
use delaygate::gateway::run_gateway_with_listener;
use delaygate::panel::ControlPanel;
use reqwest::StatusCode;
use std::time::Duration;
use tempfile::TempDir;

/// A control panel served on an ephemeral port, talking to `upstream_url`
/// and keeping its state files in a private temp dir.
pub struct GatewayTestServer {
    pub port: u16,
    pub workspace: TempDir,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    pub fn config_for(workspace: &TempDir, upstream_url: &str) -> Config {
        let mut config = Config::default();
        config.config_path = workspace.path().join("config.toml");
        config.upstream.base_url = upstream_url.to_string();
        config.upstream.api_key = "test-key".to_string();
        config.cooldown.state_file = workspace
            .path()
            .join("censor_toggle_ts")
            .display()
            .to_string();
        config.destination.uri_file = workspace.path().join("out_uri.txt").display().to_string();
        config.destination.reload_command = Vec::new();
        config
    }

    pub async fn start(upstream_url: &str) -> Self {
        let workspace = TempDir::new().expect("temp workspace should be created");
        let config = Self::config_for(&workspace, upstream_url);
        Self::start_with(workspace, &config).await
    }

    pub async fn start_with(workspace: TempDir, config: &Config) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let panel = ControlPanel::from_config(config);
        let host = "127.0.0.1".to_string();
        let handle =
            tokio::spawn(async move { run_gateway_with_listener(&host, listener, panel).await });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            workspace,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}
