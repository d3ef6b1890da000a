use config::{Config, ConfigError, Environment, File};
use multifile_field::UploadPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_root: PathBuf,
    pub field: UploadPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            upload_root: PathBuf::from("uploads"),
            field: UploadPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&ServerConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let server_config: ServerConfig = config.try_deserialize()?;

        server_config.validate()?;

        Ok(server_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.field.max_file_size == 0 {
            return Err(ConfigError::Message(
                "Max file size must be greater than 0".to_string(),
            ));
        }

        if let Some(max_files) = self.field.max_files {
            if max_files < self.field.min_files {
                return Err(ConfigError::Message(
                    "max_files cannot be below min_files".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
