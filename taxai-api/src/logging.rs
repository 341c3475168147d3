//! Tracing subscriber setup
//!
//! The subscriber is installed before the config file is read so config
//! loading can log. The level from the config file is applied afterwards
//! through a reload handle, unless `RUST_LOG` already set one.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Level used until the configured one is known
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Handle for swapping the active level filter at runtime
#[derive(Clone)]
pub struct LogLevelHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

impl LogLevelHandle {
    /// Whether `RUST_LOG` took precedence over the config file
    pub fn env_override(&self) -> bool {
        self.env_override
    }

    /// Switch to the configured level
    ///
    /// Returns `false` without changing anything when the environment
    /// filter wins.
    pub fn apply_configured_level(&self, level: &str) -> anyhow::Result<bool> {
        if self.env_override {
            return Ok(false);
        }
        self.handle.reload(EnvFilter::new(level))?;
        Ok(true)
    }
}

/// Build a subscriber writing to `make_writer`
///
/// `env_filter` is the filter parsed from the environment, if any. Without
/// one the subscriber starts at [`BOOTSTRAP_LEVEL`].
pub fn build_subscriber<W>(
    env_filter: Option<EnvFilter>,
    make_writer: W,
) -> (impl Subscriber + Send + Sync + 'static, LogLevelHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_override = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_LEVEL));
    let (filter_layer, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer));

    (
        subscriber,
        LogLevelHandle {
            handle,
            env_override,
        },
    )
}

/// Install the global subscriber on stdout
pub fn init() -> LogLevelHandle {
    let (subscriber, handle) =
        build_subscriber(EnvFilter::try_from_default_env().ok(), std::io::stdout);
    subscriber.init();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use taxai_common::config::load_or_default;
    use tracing::{debug, info};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("log buffer").clone();
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_missing_config_warning_is_logged() {
        let log = CapturedLog::default();
        let (subscriber, _handle) = build_subscriber(None, log.clone());
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.toml");

        let config = tracing::subscriber::with_default(subscriber, || {
            load_or_default(Some(missing.as_path()))
        })
        .expect("defaults");

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        let output = log.contents();
        assert!(output.contains("WARN"), "got: {}", output);
        assert!(output.contains("not found, using compiled defaults"), "got: {}", output);
    }

    #[test]
    fn test_configured_level_applied_after_startup() {
        let log = CapturedLog::default();
        let (subscriber, handle) = build_subscriber(None, log.clone());
        assert!(!handle.env_override());

        tracing::subscriber::with_default(subscriber, || {
            debug!("bootstrap debug line");
            info!("bootstrap info line");
            let applied = handle.apply_configured_level("debug").expect("reload");
            assert!(applied);
            debug!("configured debug line");
        });

        let output = log.contents();
        assert!(!output.contains("bootstrap debug line"));
        assert!(output.contains("bootstrap info line"));
        assert!(output.contains("configured debug line"));
    }

    #[test]
    fn test_env_filter_wins_over_config() {
        let log = CapturedLog::default();
        let (subscriber, handle) = build_subscriber(Some(EnvFilter::new("warn")), log.clone());
        assert!(handle.env_override());

        tracing::subscriber::with_default(subscriber, || {
            let applied = handle.apply_configured_level("debug").expect("reload");
            assert!(!applied);
            info!("suppressed info line");
        });

        assert!(!log.contents().contains("suppressed info line"));
    }
}
