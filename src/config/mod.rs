use config::{Config, ConfigError, Environment};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

/// where uploaded folders and the folder state document live
#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde", default)]
pub struct StorageConfig {
    #[serde(rename = "uploaddir")]
    pub upload_dir: String,
    /// path to the json document holding each folder's active state
    #[serde(rename = "folderconfig")]
    pub folder_config: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde", default)]
pub struct UploadConfig {
    #[serde(rename = "maxfilesizebytes")]
    pub max_file_size_bytes: u64,
    #[serde(rename = "maxfilesperrequest")]
    pub max_files_per_request: usize,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(crate = "rocket::serde", default)]
pub struct LoggingConfig {
    /// one of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
    /// when set, logs are also appended to this file
    pub file: Option<String>,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(crate = "rocket::serde", default)]
pub struct ImageFoldersConfig {
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            upload_dir: "./uploads".to_string(),
            folder_config: "./folders-config.json".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_file_size_bytes: 10 * 1024 * 1024,
            max_files_per_request: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// Parses the config file located at ./ImageFolders.toml, if it exists, and layers any
/// `IMAGE_FOLDERS__SECTION__KEY` environment variables on top of it.
/// If the file exists but can't be parsed, the application will panic
pub fn parse_config() -> ImageFoldersConfig {
    let built = Config::builder()
        .add_source(config::File::with_name("./ImageFolders.toml").required(false))
        .add_source(Environment::with_prefix("IMAGE_FOLDERS").separator("__"))
        .build()
        .and_then(|settings| settings.try_deserialize::<ImageFoldersConfig>());
    match built {
        Ok(parsed) => parsed,
        Err(ConfigError::NotFound(property)) => {
            log::warn!("Config property {property} not found. Continuing startup with defaults...");
            ImageFoldersConfig::default()
        }
        Err(e) => panic!("Failed to parse config file. Exception is {e}"),
    }
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static IMAGE_FOLDERS_CONFIG: Lazy<ImageFoldersConfig> = Lazy::new(parse_config);
