pub mod prompt;

use std::net::SocketAddr;
use thiserror::Error;
use crate::cli::Args;
use self::prompt::DEFAULT_SYSTEM_PROMPT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("Failed to read system prompt file '{path}': {source}")]
    PromptFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("System prompt file '{0}' is empty")]
    EmptyPrompt(String),
    #[error("Both --tls-cert-path and --tls-key-path must be provided to enable TLS")]
    TlsPaths,
    #[error("Invalid server address '{0}'")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Validated runtime settings. Building these is the last step before any
/// network activity, so a bad configuration stops the process early.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub chat_model: String,
    pub chat_base_url: String,
    pub system_prompt: String,
    pub max_conversations: usize,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("chat_model", &self.chat_model)
            .field("chat_base_url", &self.chat_base_url)
            .field("max_conversations", &self.max_conversations)
            .field("bind_addr", &self.bind_addr)
            .field("tls", &self.tls)
            .finish()
    }
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = args.groq_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        let system_prompt = match &args.system_prompt_path {
            Some(path) => prompt::load_system_prompt(path)?,
            None => DEFAULT_SYSTEM_PROMPT.to_string(),
        };

        let addr = format!("{}:{}", args.host, args.port);
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(addr.clone()))?;

        let tls = if args.enable_tls {
            match (&args.tls_cert_path, &args.tls_key_path) {
                (Some(cert_path), Some(key_path)) =>
                    Some(TlsPaths {
                        cert_path: cert_path.clone(),
                        key_path: key_path.clone(),
                    }),
                _ => {
                    return Err(ConfigError::TlsPaths);
                }
            }
        } else {
            None
        };

        Ok(Self {
            api_key,
            chat_model: args.chat_model.clone(),
            chat_base_url: args.chat_base_url.clone(),
            system_prompt,
            max_conversations: args.max_conversations,
            bind_addr,
            tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["campus-chatbot", "--groq-api-key", "gsk_test"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_hosted_service() {
        let settings = Settings::from_args(&args(&[])).unwrap();
        assert_eq!(settings.api_key, "gsk_test");
        assert_eq!(settings.chat_model, "llama-3.1-70b-versatile");
        assert_eq!(settings.bind_addr.port(), 8001);
        assert_eq!(settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(settings.max_conversations, 0);
        assert!(settings.tls.is_none());
    }

    #[test]
    fn missing_or_blank_api_key_is_fatal() {
        let mut a = args(&[]);
        a.groq_api_key = None;
        assert!(matches!(Settings::from_args(&a), Err(ConfigError::MissingApiKey)));

        a.groq_api_key = Some("   ".into());
        assert!(matches!(Settings::from_args(&a), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn tls_requires_both_paths() {
        let mut a = args(&["--enable-tls", "--tls-cert-path", "cert.pem"]);
        a.tls_key_path = None;
        assert!(matches!(Settings::from_args(&a), Err(ConfigError::TlsPaths)));

        a.tls_key_path = Some("key.pem".into());
        let tls = Settings::from_args(&a).unwrap().tls.unwrap();
        assert_eq!(tls.cert_path, "cert.pem");
        assert_eq!(tls.key_path, "key.pem");
    }

    #[test]
    fn bad_host_is_rejected() {
        let a = args(&["--host", "not a host"]);
        assert!(matches!(Settings::from_args(&a), Err(ConfigError::InvalidAddress(_))));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let settings = Settings::from_args(&args(&[])).unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("gsk_test"));
    }
}
