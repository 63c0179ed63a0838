pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;
pub mod history;

use agent::ChatAgent;
use cli::Args;
use config::Settings;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let settings = Settings::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", settings.bind_addr);
    info!("Chat Model: {}", settings.chat_model);
    info!("Chat Base URL: {}", settings.chat_base_url);
    info!("System Prompt: {}", args.system_prompt_path.as_deref().unwrap_or("built-in"));
    info!("Max Conversations: {}", settings.max_conversations);
    info!("TLS Enabled: {}", settings.tls.is_some());
    info!("-------------------------");

    let agent = Arc::new(ChatAgent::from_settings(&settings)?);
    let server = Server::new(&settings, agent);
    server.run().await?;

    Ok(())
}
