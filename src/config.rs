use clap::Parser;
use std::time::Duration;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-gateway")]
#[command(about = "Rate limited, validating gateway in front of the Gemini API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Base url of the generation API (overridable for local testing)
    #[arg(long, default_value = "https://generativelanguage.googleapis.com")]
    pub upstream_url: String,

    // Model used for generateContent
    #[arg(short, long, default_value = "gemini-2.0-flash-exp")]
    pub model: String,

    // Upstream API key. Missing key is reported on every chat request.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Rate limit max requests per window, at least 1
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,

    // Expired window sweep interval in seconds, 0 keeps every window forever
    #[arg(long, default_value_t = 0)]
    pub sweep_interval: u64,
}

impl Args {
    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_limits() {
        let args = Args::try_parse_from(["chat-gateway"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.rate_limit, 10);
        assert_eq!(args.rate_window(), Duration::from_secs(60));
        assert!(args.sweep_interval().is_none());
    }

    #[test]
    fn zero_rate_limit_is_rejected() {
        assert!(Args::try_parse_from(["chat-gateway", "--rate-limit", "0"]).is_err());
        let args = Args::try_parse_from(["chat-gateway", "--rate-limit", "1"]).unwrap();
        assert_eq!(args.rate_limit, 1);
    }

    #[test]
    fn sweep_interval_enabled_when_positive() {
        let args = Args::try_parse_from(["chat-gateway", "--sweep-interval", "120"]).unwrap();
        assert_eq!(args.sweep_interval(), Some(Duration::from_secs(120)));
    }
}
