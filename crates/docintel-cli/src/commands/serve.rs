//! Serve command

use crate::app::ServeArgs;
use anyhow::Result;
use docintel_core::{Config, DocumentService};
use docintel_server::AppState;

pub async fn run(args: ServeArgs, config: Config, service: DocumentService) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    let state = AppState::new(service, config.default_provider);
    docintel_server::start_server(&server, state).await
}
