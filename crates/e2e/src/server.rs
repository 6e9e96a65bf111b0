//! Page server management
//!
//! The report page ships outside this repository, so the default is to
//! attach to an already-running instance at the base URL. A serve command
//! can be supplied instead; the child is torn down with SIGTERM then kill
//! when the handle drops. Either way the page must answer HTTP before any
//! scenario runs. The page exposes no health endpoint, so any HTTP status
//! counts as reachable; only connection-level errors keep the poll going.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Handle to the page under test: either an attached external instance or a
/// spawned child process.
pub struct PageServer {
    child: Option<Child>,
    base_url: String,
}

impl PageServer {
    /// Spawn the serve command if one is configured, then poll the base URL
    /// until it answers or the startup timeout elapses.
    pub async fn ensure(config: ServerConfig) -> E2eResult<Self> {
        let child = match &config.command {
            Some(command) => {
                info!("Spawning page server: {}", command);
                let child = Command::new("sh")
                    .arg("-c")
                    .arg(command)
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(|e| {
                        E2eError::ServerStartup(format!("failed to spawn {:?}: {}", command, e))
                    })?;
                Some(child)
            }
            None => {
                info!("Attaching to page at {}", config.base_url);
                None
            }
        };

        let server = PageServer {
            child,
            base_url: config.base_url.clone(),
        };

        server
            .wait_for_reachable(config.startup_timeout)
            .await?;

        info!("Page is up at {}", server.base_url);
        Ok(server)
    }

    /// Poll the base URL until it answers
    async fn wait_for_reachable(&self, timeout_duration: Duration) -> E2eResult<()> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&self.base_url).send().await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for page to answer...");
                    }
                    // Connection refused is expected while a spawned server starts
                    if !e.is_connect() && !e.is_timeout() {
                        warn!("Reachability check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(200)).await;
        }

        Err(E2eError::PageUnreachable {
            url: self.base_url.clone(),
            attempts,
        })
    }

    /// Get the base URL for the page
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop a spawned server, if any
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            info!("Stopping page server (pid: {})", child.id());

            // Try graceful shutdown first
            #[cfg(unix)]
            {
                use nix::sys::signal::{kill, Signal};
                use nix::unistd::Pid;

                let pid = Pid::from_raw(child.id() as i32);
                if kill(pid, Signal::SIGTERM).is_ok() {
                    std::thread::sleep(Duration::from_millis(500));
                }
            }

            // Force kill if still running
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for PageServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Configuration for reaching (or launching) the page under test
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL the page is (or will be) served at
    pub base_url: String,

    /// Optional command that serves the page, run via `sh -c`
    pub command: Option<String>,

    /// How long to poll the base URL before giving up
    pub startup_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            command: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_attaches_to_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.command.is_none());
    }

    #[tokio::test]
    async fn unreachable_page_reports_attempts() {
        // Reserved port, nothing listening.
        let config = ServerConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            command: None,
            startup_timeout: Duration::from_millis(300),
        };
        match PageServer::ensure(config).await {
            Err(E2eError::PageUnreachable { url, attempts }) => {
                assert_eq!(url, "http://127.0.0.1:1");
                assert!(attempts >= 1);
            }
            Err(other) => panic!("expected PageUnreachable, got {}", other),
            Ok(server) => panic!("unexpectedly reached {}", server.base_url()),
        }
    }
}
