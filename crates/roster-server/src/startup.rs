//! Server startup utilities.

use roster_config::{DatabaseBackend, ServerConfig};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Lines describing where the server can be reached.
#[must_use]
pub fn startup_lines(server: &ServerConfig, backend: DatabaseBackend) -> Vec<String> {
    let base = format!("http://{}", server.rest_addr());
    vec![
        format!("REST API:  {}/user", base),
        format!("Health:    {}/health", base),
        format!("API Docs:  {}/swagger-ui", base),
        format!("Storage:   {}", backend),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig, backend: DatabaseBackend) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    for line in startup_lines(server, backend) {
        info!("{}", line);
    }
    info!("{}", separator);
}
