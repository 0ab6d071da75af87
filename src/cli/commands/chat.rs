use anyhow::Result;

use super::{connect, load_config};
use crate::chat::ChatSession;
use crate::config::ResolveOptions;

pub async fn run_chat(options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    let client = connect(&config);
    let mut session = ChatSession::new(config, client);
    session.run().await
}
