//! # CLI — hourly news container generator
//!
//! Builds one signed container per configured locale for the current hour.
//! Designed to run from cron once an hour; every run is independent and
//! the cross-hour cache stitches the runs into one rolling daily index.
//!
//! ## Configuration
//!
//! All settings are controlled via environment variables:
//!
//! ```text
//! NEWS_COUNTRIES  locale config file        (default: "countries.json")
//! NEWS_FEED_DIR   pre-fetched feed files    (default: "feeds")
//! NEWS_CACHE_DIR  cross-hour cache files    (default: "cache")
//! NEWS_OUT_DIR    artifact output root      (default: ".")
//! NEWS_KEY_PATH   PKCS#1 PEM signing key    (default: "private.pem")
//! ```
//!
//! Artifacts land at `{NEWS_OUT_DIR}/v2/{language}/{country:03}/news.bin.{hour:02}`.
//!
//! ## Failure model
//!
//! A missing or invalid signing key aborts the whole process before any
//! locale runs. A failure inside one locale's run (feed unreadable, cache
//! slot corrupt, artifact write error) is logged and skips only that
//! locale; the process exits non-zero if any locale failed.

use anyhow::{Context, Result};
use assemble::{NewsFile, RunContext};
use cache::CacheStore;
use chrono::{Local, Timelike};
use feed::{Countries, CountryConfig};
use publish::SigningKey;
use std::path::{Path, PathBuf};

mod source;

use source::FileFeed;

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

struct Config {
    countries_path: PathBuf,
    feed_dir: PathBuf,
    cache_dir: PathBuf,
    out_dir: PathBuf,
    key_path: PathBuf,
}

impl Config {
    fn from_env() -> Self {
        Self {
            countries_path: env_or("NEWS_COUNTRIES", "countries.json").into(),
            feed_dir: env_or("NEWS_FEED_DIR", "feeds").into(),
            cache_dir: env_or("NEWS_CACHE_DIR", "cache").into(),
            out_dir: env_or("NEWS_OUT_DIR", ".").into(),
            key_path: env_or("NEWS_KEY_PATH", "private.pem").into(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let raw = std::fs::read_to_string(&config.countries_path)
        .with_context(|| format!("reading {}", config.countries_path.display()))?;
    let countries: Countries = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", config.countries_path.display()))?;

    // The key gates publication for every locale, so fail before any work.
    let key = SigningKey::from_pem_file(&config.key_path)
        .with_context(|| format!("loading {}", config.key_path.display()))?;

    let now = Local::now();
    let clock = (now.timestamp(), now.hour() as u8);

    let mut failed = 0usize;
    for country in &countries.countries {
        match run_locale(&config, &key, country, clock) {
            Ok(path) => {
                tracing::info!(
                    country = country.country_code,
                    language = country.language_code,
                    path = %path.display(),
                    "locale published"
                );
            }
            Err(err) => {
                failed += 1;
                tracing::error!(
                    country = country.country_code,
                    language = country.language_code,
                    error = %format!("{:#}", err),
                    "locale failed"
                );
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} locale(s) failed", failed);
    }
    Ok(())
}

/// Builds, finishes, and writes one locale's artifact for the current hour.
fn run_locale(
    config: &Config,
    key: &SigningKey,
    country: &CountryConfig,
    (now_unix, hour): (i64, u8),
) -> Result<PathBuf> {
    let ctx = RunContext {
        now_unix,
        hour,
        country_code: country.country_code,
        language_code: country.language_code,
    };

    let store = CacheStore::new(&config.cache_dir, ctx.country_code, ctx.language_code);
    let source = open_source(&config.feed_dir, &country.source)?;

    let mut file = NewsFile::assemble(&ctx, &source, &store)?;
    let artifact = publish::finish(&mut file, key)?;

    let path = publish::artifact_path(&config.out_dir, ctx.language_code, ctx.country_code, hour);
    publish::write_artifact(&path, &artifact)?;

    Ok(path)
}

/// Maps a configured source name onto a concrete feed.
///
/// Live scrapers are external collaborators; in this generator every
/// configured name resolves to a pre-fetched feed file of the same name
/// under the feed directory.
fn open_source(feed_dir: &Path, name: &str) -> Result<FileFeed> {
    FileFeed::open(feed_dir, name).with_context(|| format!("opening feed {:?}", name))
}
