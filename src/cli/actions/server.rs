use crate::cli::actions::Action;
use crate::pordego::new;
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            frontend_url,
        } => {
            // Fail fast on a malformed DSN instead of surfacing a pool error later.
            Url::parse(&dsn).context("Invalid database DSN")?;

            new(port, dsn, frontend_url).await?;
        }
    }

    Ok(())
}
