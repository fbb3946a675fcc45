//! Static server command.

use std::path::PathBuf;

use anyhow::Result;

use taskboard::server::{start_server, ServeConfig};

pub async fn cmd_serve(port: u16, dir: PathBuf, spa: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "Bundle directory {} does not exist. Build the front-end first.",
            dir.display()
        );
    }
    start_server(ServeConfig { port, dir, spa }).await
}
