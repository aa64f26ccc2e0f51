use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use ini::Ini;

use crate::{
    CachedSource, EnvIdentity, HttpTransport, Repository, APP_NAME, DEFAULT_CACHE_TTL,
};

pub type RemoteRepository = Repository<HttpTransport, EnvIdentity>;
pub type RemoteSource = CachedSource<RemoteRepository, EnvIdentity>;

// Config is read from $XDG_CONFIG_HOME/diary/config.ini, e.g.:
// ```
// [remote]
// url = https://diary.example.com
//
// [identity]
// user = 42
//
// [cache]
// ttl_secs = 300
// ```
// Every key is optional. DIARY_URL overrides the remote url.
// The user key can be overridden with DIARY_USER, which is re-read on every
// request (see `Config::identity`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub user: Option<String>,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT_URL.into(),
            user: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl Config {
    pub const DEFAULT_URL: &'static str = "http://localhost:8080";
    pub const URL_VAR: &'static str = "DIARY_URL";
    const FILE_NAME: &'static str = "config.ini";

    // Load the user's config file, if there is one, and apply overrides from
    // the environment.
    pub fn load() -> Result<Config> {
        let dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
        let mut config = match dirs.find_config_file(Self::FILE_NAME) {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::debug!("No config file found, using defaults");
                Config::default()
            }
        };
        if let Ok(url) = std::env::var(Self::URL_VAR) {
            config.url = url;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        log::debug!("Loading config from {path:?}");
        let ini = Ini::load_from_file(path).with_context(|| format!("Reading {path:?}"))?;
        Self::from_ini(&ini).with_context(|| format!("Invalid config {path:?}"))
    }

    pub fn parse(s: &str) -> Result<Config> {
        Self::from_ini(&Ini::load_from_str(s)?)
    }

    fn from_ini(ini: &Ini) -> Result<Config> {
        let mut config = Config::default();
        let get = |section: &str, key: &str| ini.section(Some(section)).and_then(|s| s.get(key));
        if let Some(url) = get("remote", "url") {
            config.url = url.trim().into();
        }
        if let Some(user) = get("identity", "user") {
            config.user = Some(user.trim().into());
        }
        if let Some(ttl) = get("cache", "ttl_secs") {
            let secs = ttl
                .trim()
                .parse()
                .with_context(|| format!("Parsing cache ttl_secs '{ttl}'"))?;
            config.cache_ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }

    // The signed-in user: DIARY_USER if set, otherwise the configured user.
    pub fn identity(&self) -> EnvIdentity {
        EnvIdentity::new(EnvIdentity::DEFAULT_VAR, self.user.clone())
    }

    pub fn repository(&self) -> RemoteRepository {
        Repository::new(HttpTransport::new(self.url.as_str()), self.identity())
    }

    // The repository behind a cache that keeps answers for `cache_ttl`.
    pub fn source(&self) -> RemoteSource {
        CachedSource::new(self.repository(), self.identity(), self.cache_ttl)
    }
}
