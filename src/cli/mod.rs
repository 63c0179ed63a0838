use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Upstream LLM Args ---
    /// API key for the Groq chat completion API. Required.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "llama-3.1-70b-versatile")]
    pub chat_model: String,

    /// Base URL of the OpenAI-compatible Groq API; `/chat/completions` is appended.
    #[arg(long, env = "CHAT_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    pub chat_base_url: String,

    /// Optional plain-text file replacing the built-in system prompt.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,

    // --- History Store Args ---
    /// Maximum number of conversations kept in memory. 0 keeps all of them.
    #[arg(long, env = "MAX_CONVERSATIONS", default_value = "0")]
    pub max_conversations: usize,

    // --- Server Args ---
    /// Host address for the HTTP server to listen on.
    #[arg(long, env = "CHATBOT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP server to listen on.
    #[arg(long, env = "CHATBOT_PORT", default_value = "8001")]
    pub port: u16,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
