//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

use cv_shared::config::UploadConfig;

/// Push movie records to the bulk index
#[derive(Parser, Debug)]
#[command(name = "cv-ingest", version, about)]
pub struct Cli {
    /// JSON Lines file with one record per line
    #[arg(long, short)]
    pub input: PathBuf,

    /// Target namespace (defaults to BULK_NAMESPACE)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Records per batch (defaults to UPLOAD_BATCH_SIZE)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Skip every batch up to and including this index
    #[arg(long)]
    pub resume_after: Option<usize>,

    /// Bulk endpoint base URL
    #[arg(long, env = "BULK_ENDPOINT", hide_env_values = true)]
    pub endpoint: Option<String>,
}

impl Cli {
    /// Command line values take precedence over the environment
    pub fn apply(&self, config: &mut UploadConfig) {
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_upload_config() {
        let cli = Cli::parse_from([
            "cv-ingest",
            "--input",
            "movies.jsonl",
            "--namespace",
            "films",
            "--batch-size",
            "25",
            "--resume-after",
            "3",
            "--endpoint",
            "https://index.example.com",
        ]);
        let mut config = UploadConfig::default();
        cli.apply(&mut config);

        assert_eq!(cli.resume_after, Some(3));
        assert_eq!(config.namespace, "films");
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.endpoint, "https://index.example.com");
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["cv-ingest", "-i", "movies.jsonl"]);
        let mut config = UploadConfig::default();
        config.endpoint = "https://from-env.example.com".to_string();
        let before = config.clone();
        cli.apply(&mut config);

        assert_eq!(config.namespace, before.namespace);
        assert_eq!(config.batch_size, before.batch_size);
        assert_eq!(cli.resume_after, None);
    }
}
