use std::{
    env::{self, VarError},
    fs,
    ops::Deref,
    path::Path,
    sync::Arc,
    time::Duration,
};

use url::Url;

use crate::{error::Error, provider::HTTP, renderer::PollingRenderer};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub renderer: Arc<PollingRenderer<HTTP>>,
}

impl State {
    pub fn new(config: Config) -> Result<State, Error> {
        let http = HTTP::new(config.clone())?;
        let renderer = Arc::new(PollingRenderer::new(
            http,
            Duration::from_millis(config.message_timeout),
        ));

        Ok(Self { config, renderer })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: Url,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub refresh_interval: u64,
    pub message_timeout: u64,
    pub timeout: Option<u64>,
}

impl Config {
    pub fn get_update_url(&self) -> Result<Url, Error> {
        Ok(self.api_host.join("api/update")?)
    }

    pub fn get_coins_url(&self) -> Result<Url, Error> {
        Ok(self.api_host.join("api/coins")?)
    }
}

pub const DEFAULT_REFRESH_INTERVAL_IN_SEC: u64 = 300;
pub const DEFAULT_MESSAGE_TIMEOUT_IN_MS: u64 = 3000;

pub fn get_configuration() -> Result<Config, Error> {
    let api_host = Url::parse(&env::var("API_HOST")?)?;
    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;

    let allowed_origins = var_or("ALLOWED_ORIGINS", "*")?
        .split(',')
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect::<Vec<String>>();

    let static_dir = format!(
        "{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        var_or("STATIC_DIRECTORY", "static")?
    );

    let refresh_interval: u64 = match env::var("REFRESH_INTERVAL_IN_SEC") {
        Ok(value) => value.parse()?,
        Err(VarError::NotPresent) => DEFAULT_REFRESH_INTERVAL_IN_SEC,
        Err(e) => return Err(e.into()),
    };

    if refresh_interval == 0 {
        return Err(Error::ConfigurationError(String::from(
            "REFRESH_INTERVAL_IN_SEC must be greater than 0",
        )));
    }

    let message_timeout: u64 = match env::var("MESSAGE_TIMEOUT_IN_MS") {
        Ok(value) => value.parse()?,
        Err(VarError::NotPresent) => DEFAULT_MESSAGE_TIMEOUT_IN_MS,
        Err(e) => return Err(e.into()),
    };

    let timeout = match env::var("TIMEOUT") {
        Ok(value) => Some(value.parse()?),
        Err(VarError::NotPresent) => None,
        Err(e) => return Err(e.into()),
    };

    let config = Config {
        api_host,
        server_host,
        port,
        allowed_origins,
        static_dir,
        refresh_interval,
        message_timeout,
        timeout,
    };

    Ok(config)
}

/// Loads `.env` from the crate directory into the process environment.
/// Variables already set in the environment win over the file.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    if !Path::new(&path).exists() {
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;

    for (key, value) in parse_config_string(&config_string) {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect()
}

fn var_or(key: &str, default: &str) -> Result<String, Error> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(default.to_owned()),
        Err(e) => Err(e.into()),
    }
}
