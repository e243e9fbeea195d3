use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
            ProviderKind::Ollama => "llama3.1",
        }
    }

    pub fn needs_api_key(self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }
}

#[derive(Parser, Debug)]
#[command(name = "neo-intercept", version, about = "NEO data proxy and AI interception planner")]
pub struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "AI_PROVIDER", value_enum, default_value_t = ProviderKind::OpenAI)]
    pub provider: ProviderKind,

    /// Defaults to the provider's standard model.
    #[arg(long, env = "AI_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    pub nasa_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    #[arg(long, env = "NEO_BASE_URL", default_value = "https://api.nasa.gov/neo/rest/v1")]
    pub neo_base_url: String,

    #[arg(long, default_value_t = 10)]
    pub neo_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub ai_timeout_secs: u64,

    #[arg(long, default_value_t = 3)]
    pub ai_max_attempts: u32,

    #[arg(long, default_value_t = 500)]
    pub ai_retry_base_ms: u64,

    /// Serve a demo-mode narrative when impact prediction generation fails.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub narrative_fallback: bool,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}
