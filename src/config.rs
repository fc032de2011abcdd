use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use validator::Validate;

use crate::map::GeoPoint;

#[derive(Parser, Debug)]
#[command(name = "wanderly", about = "Place discovery and travel feed server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Skip loading the demo catalog
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[validate(nested)]
    pub map: MapConfig,
    #[validate(nested)]
    pub viewer: ViewerConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
    /// Load the demo catalog on startup
    pub seed_fixtures: bool,
}

/// Initial viewport of the schematic map
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(default)]
pub struct MapConfig {
    #[validate(range(min = 1, max = 15))]
    pub initial_zoom: u8,
    #[validate(range(min = -90.0, max = 90.0))]
    pub center_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub center_longitude: f64,
    #[validate(range(min = 1, max = 15))]
    pub detail_zoom: u8,
}

/// The user the server acts on behalf of
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(default)]
pub struct ViewerConfig {
    #[validate(length(min = 1))]
    pub user_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_fixtures: true,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 3,
            center_latitude: 40.0,
            center_longitude: 0.0,
            detail_zoom: 10,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            user_id: "me".to_string(),
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_latitude, self.center_longitude)
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config: Config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if cli.no_seed {
            config.database.seed_fixtures = false;
        }

        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("wanderly.db"));
        }

        config.validate()?;

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".wanderly")
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("wanderly.db"))
    }
}
