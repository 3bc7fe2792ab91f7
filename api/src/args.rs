use std::{path::PathBuf, time::Duration};

use basket_core::domain::{
    common::{
        BasketConfig, FetchConfig, FormattingConfig, NlpBackend, NlpConfig, OcrConfig,
    },
    shopping_list::value_objects::UncategorizedPolicy,
};
use clap::{Args as ClapArgs, Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "basket", version, about = "Turns recipe photos into shopping lists")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub messaging: MessagingArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub nlp: NlpArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub formatting: FormattingArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5555"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "tls-cert", env = "TLS_CERT")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long = "tls-key", env = "TLS_KEY")]
    pub tls_key: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct MessagingArgs {
    /// Enables `X-Twilio-Signature` validation on the webhook routes.
    #[arg(long = "twilio-auth-token", env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub twilio_auth_token: Option<String>,

    /// Externally visible base URL the gateway posts to, used to rebuild
    /// the signed URL.
    #[arg(long = "public-url", env = "PUBLIC_URL")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "aws-region", env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "textract-endpoint", env = "TEXTRACT_ENDPOINT")]
    pub endpoint: Option<String>,

    #[arg(long = "aws-access-key-id", env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    #[arg(
        long = "aws-secret-access-key",
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true
    )]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NlpBackendArg {
    Local,
    Remote,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct NlpArgs {
    #[arg(long = "nlp-backend", env = "NLP_BACKEND", value_enum, default_value_t = NlpBackendArg::Local)]
    pub backend: NlpBackendArg,

    #[arg(long = "model-dir", env = "MODEL_DIR", default_value = "models")]
    pub model_dir: PathBuf,

    #[arg(long = "ingredient-model", env = "INGREDIENT_MODEL", default_value = "ingredient_ner")]
    pub ingredient_model: String,

    #[arg(long = "category-model", env = "CATEGORY_MODEL", default_value = "ingredient_category")]
    pub category_model: String,

    #[arg(long = "inference-url", env = "INFERENCE_URL")]
    pub inference_url: Option<String>,

    #[arg(long = "inference-token", env = "INFERENCE_TOKEN", hide_env_values = true)]
    pub inference_token: Option<String>,

    #[arg(long = "inference-timeout-secs", env = "INFERENCE_TIMEOUT_SECS", default_value_t = 10)]
    pub inference_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FetchArgs {
    #[arg(long = "fetch-timeout-secs", env = "FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long = "max-image-bytes", env = "MAX_IMAGE_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UncategorizedArg {
    Drop,
    Surface,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FormattingArgs {
    /// What to do with ingredients whose label has no display section.
    #[arg(long = "uncategorized", env = "UNCATEGORIZED", value_enum, default_value_t = UncategorizedArg::Drop)]
    pub uncategorized: UncategorizedArg,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is unset.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<NlpBackendArg> for NlpBackend {
    fn from(backend: NlpBackendArg) -> Self {
        match backend {
            NlpBackendArg::Local => NlpBackend::Local,
            NlpBackendArg::Remote => NlpBackend::Remote,
        }
    }
}

impl From<UncategorizedArg> for UncategorizedPolicy {
    fn from(policy: UncategorizedArg) -> Self {
        match policy {
            UncategorizedArg::Drop => UncategorizedPolicy::Drop,
            UncategorizedArg::Surface => UncategorizedPolicy::Surface,
        }
    }
}

impl From<Args> for BasketConfig {
    fn from(args: Args) -> Self {
        BasketConfig {
            fetch: FetchConfig {
                timeout: Duration::from_secs(args.fetch.timeout_secs),
                max_image_bytes: args.fetch.max_image_bytes,
            },
            ocr: OcrConfig {
                region: args.ocr.region,
                endpoint: args.ocr.endpoint,
                access_key: args.ocr.access_key,
                secret_key: args.ocr.secret_key,
            },
            nlp: NlpConfig {
                backend: args.nlp.backend.into(),
                model_dir: args.nlp.model_dir,
                ingredient_model: args.nlp.ingredient_model,
                category_model: args.nlp.category_model,
                inference_url: args.nlp.inference_url,
                inference_token: args.nlp.inference_token,
                timeout: Duration::from_secs(args.nlp.inference_timeout_secs),
            },
            formatting: FormattingConfig {
                uncategorized: args.formatting.uncategorized.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_convert_to_core_config() {
        let args = Args::try_parse_from([
            "basket",
            "--nlp-backend",
            "remote",
            "--inference-url",
            "https://inference.example.com/models",
            "--uncategorized",
            "surface",
            "--max-image-bytes",
            "2048",
            "--allowed-origins",
            "https://a.example.com,https://b.example.com",
        ])
        .unwrap();

        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = BasketConfig::from(args);
        assert_eq!(config.nlp.backend, NlpBackend::Remote);
        assert_eq!(
            config.nlp.inference_url.as_deref(),
            Some("https://inference.example.com/models")
        );
        assert_eq!(config.formatting.uncategorized, UncategorizedPolicy::Surface);
        assert_eq!(config.fetch.max_image_bytes, 2048);
    }
}
