use crate::cli::actions::Action;
use crate::intake;
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, store } => intake::new(port, store).await?,
    }

    Ok(())
}
