use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use eyre::{Result, WrapErr};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

/// A chromedriver child process, killed when dropped.
pub struct ChromeDriverProcess {
    child: Child,
    port: u16,
}

impl ChromeDriverProcess {
    /// Starts the chromedriver at `executable` on a free local port.
    pub async fn spawn(executable: &Path) -> Result<Self> {
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let child = Command::new(executable)
            .arg(format!("--port={port}"))
            .stdout(Stdio::null())
            .spawn()
            .wrap_err_with(|| format!("Failed to spawn chromedriver at {}", executable.display()))?;
        info!(port, "started chromedriver");

        // chromedriver gives no readiness signal
        sleep(Duration::from_secs(2)).await;
        Ok(Self { child, port })
    }

    /// WebDriver endpoint of the process.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

impl Drop for ChromeDriverProcess {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            warn!("failed to stop chromedriver: {e}");
        }
        if let Err(e) = self.child.wait() {
            warn!("failed to reap chromedriver: {e}");
        }
    }
}
