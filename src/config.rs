use std::{env, fs, path::Path};

use anyhow::{bail, Result};
use log::{debug, warn};

pub const DEFAULT_ENV_FILE: &str = "/etc/default/flarelist";

// Establish the configuration as it pertains to the Cloudflare Lists API

#[derive(Debug, Clone)]
pub struct Config {
    pub api_email: String,
    pub api_key: String,
    pub account_id: String,
    pub list_id: String,
    pub comment: String,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_email: require("CLOUDFLARE_API_EMAIL")?,
            api_key: require("CLOUDFLARE_API_KEY")?,
            account_id: require("ACCOUNT_ID")?,
            list_id: require("LIST_ID")?,
            comment: require("COMMENT")?,
            debug: env::var("DEBUG").map(|v| truthy(&v)).unwrap_or(false),
        })
    }
}

fn require(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("required environment variable {} is missing or empty", name),
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Loads `KEY=VALUE` lines from `path` into the process environment.
/// File values overwrite variables that are already set.
pub fn load_env_file(path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!("environment file {} not loaded: {}", path.display(), e);
            return;
        }
    };

    for (lineno, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Split on the first '=' only; the value may itself contain '='.
        match line.split_once('=') {
            Some((key, value)) => env::set_var(key.trim(), value),
            None => {
                warn!(
                    "{}:{}: line has no '=', ignoring the rest of the file",
                    path.display(),
                    lineno + 1
                );
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::NamedTempFile;

    // Tests here mutate the process environment and must not overlap.
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    fn write_env_file(contents: &str) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), contents).unwrap();
        file
    }

    const REQUIRED: [&str; 5] = [
        "CLOUDFLARE_API_EMAIL",
        "CLOUDFLARE_API_KEY",
        "ACCOUNT_ID",
        "LIST_ID",
        "COMMENT",
    ];

    fn set_required_vars() {
        env::set_var("CLOUDFLARE_API_EMAIL", "admin@example.com");
        env::set_var("CLOUDFLARE_API_KEY", "secret");
        env::set_var("ACCOUNT_ID", "acct");
        env::set_var("LIST_ID", "list-1");
        env::set_var("COMMENT", "home");
    }

    fn clear_vars() {
        for name in REQUIRED {
            env::remove_var(name);
        }
        env::remove_var("DEBUG");
    }

    #[test]
    fn splits_on_first_equals_only() {
        let _guard = env_lock();
        let file = write_env_file("FLARELIST_TEST_A=1\nFLARELIST_TEST_B=2=x\n");

        load_env_file(file.path());

        assert_eq!(env::var("FLARELIST_TEST_A").unwrap(), "1");
        assert_eq!(env::var("FLARELIST_TEST_B").unwrap(), "2=x");
        env::remove_var("FLARELIST_TEST_A");
        env::remove_var("FLARELIST_TEST_B");
    }

    #[test]
    fn line_without_equals_stops_parsing() {
        let _guard = env_lock();
        let file = write_env_file("FLARELIST_TEST_C=1\nbogus\nFLARELIST_TEST_D=3\n");

        load_env_file(file.path());

        // Lines before the malformed one stay applied, the rest is dropped.
        assert_eq!(env::var("FLARELIST_TEST_C").unwrap(), "1");
        assert!(env::var("FLARELIST_TEST_D").is_err());
        env::remove_var("FLARELIST_TEST_C");
    }

    #[test]
    fn file_values_overwrite_environment() {
        let _guard = env_lock();
        env::set_var("FLARELIST_TEST_E", "old");
        let file = write_env_file("FLARELIST_TEST_E=new\n");

        load_env_file(file.path());

        assert_eq!(env::var("FLARELIST_TEST_E").unwrap(), "new");
        env::remove_var("FLARELIST_TEST_E");
    }

    #[test]
    fn empty_lines_are_skipped() {
        let _guard = env_lock();
        let file = write_env_file("\n\nFLARELIST_TEST_F=1\n\n");

        load_env_file(file.path());

        assert_eq!(env::var("FLARELIST_TEST_F").unwrap(), "1");
        env::remove_var("FLARELIST_TEST_F");
    }

    #[test]
    fn missing_file_is_not_fatal() {
        let _guard = env_lock();
        load_env_file(Path::new("/nonexistent/flarelist.env"));
    }

    #[test]
    fn from_env_reads_all_fields() {
        let _guard = env_lock();
        clear_vars();
        set_required_vars();
        env::set_var("DEBUG", "1");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_email, "admin@example.com");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.account_id, "acct");
        assert_eq!(config.list_id, "list-1");
        assert_eq!(config.comment, "home");
        assert!(config.debug);
        clear_vars();
    }

    #[test]
    fn from_env_rejects_missing_variable() {
        let _guard = env_lock();
        clear_vars();
        set_required_vars();
        env::remove_var("COMMENT");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("COMMENT"));
        clear_vars();
    }

    #[test]
    fn from_env_rejects_empty_variable() {
        let _guard = env_lock();
        clear_vars();
        set_required_vars();
        env::set_var("LIST_ID", "  ");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("LIST_ID"));
        clear_vars();
    }

    #[test]
    fn debug_flag_accepts_common_spellings() {
        let _guard = env_lock();
        clear_vars();
        set_required_vars();

        for (value, expected) in [("1", true), ("TRUE", true), ("yes", true), ("0", false), ("off", false)] {
            env::set_var("DEBUG", value);
            assert_eq!(Config::from_env().unwrap().debug, expected, "DEBUG={}", value);
        }
        clear_vars();
    }
}
