//! Configuration loaded from a YAML file.
//!
//! ```yaml
//! webserver:
//!   bind_address: "0.0.0.0:8080"
//! lnurl:
//!   url_authority: https://example.com
//!   icon_file: icon.png
//!   short_description: "Tips welcome"
//!   min_pay_request_sats: 100
//!   max_pay_request_sats: 10000
//!   invoice_expiry: 10m
//! lightning_address_usernames: [alice]
//! lnd:
//!   host: "127.0.0.1:8080"
//!   tls_cert_file: tls.cert
//!   macaroon_file: invoice.macaroon
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lnd_invoicer::{LndConfig, LndError};
use lnurl_pay::{PayRange, ServiceConfig};
use serde::Deserialize;

use crate::error::{ConfigError, ServerError};
use crate::listener::{AutocertSettings, TlsStrategy};

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub webserver: WebserverConfig,
    pub lnurl: LnurlConfig,
    pub lightning_address_usernames: Vec<String>,
    pub lnd: LndSection,
}

/// Listener and certificate settings.
///
/// Either `autocert_domains` (with `autocert_dir`) or `bind_address` is set,
/// never both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebserverConfig {
    pub bind_address: Option<String>,
    pub tls_cert_file: Option<PathBuf>,
    pub tls_key_file: Option<PathBuf>,
    pub autocert_domains: Vec<String>,
    /// Certificate cache directory for automatic mode.
    pub autocert_dir: Option<PathBuf>,
    /// Contact address registered with the ACME account.
    pub autocert_email: Option<String>,
    /// Use the Let's Encrypt staging directory.
    pub autocert_staging: bool,
}

/// What every Lightning Address advertises.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LnurlConfig {
    pub url_authority: String,
    pub icon_file: PathBuf,
    pub short_description: String,
    pub max_pay_request_sats: u64,
    pub min_pay_request_sats: u64,
    /// Zero, or absent, leaves the expiry to LND's default.
    #[serde(with = "humantime_serde")]
    pub invoice_expiry: Duration,
}

/// LND REST connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LndSection {
    pub host: String,
    pub tls_cert_file: Option<PathBuf>,
    pub macaroon_file: PathBuf,
    /// Talk to LND over plain HTTP. Only for local development.
    pub unsafe_allow_plaintext: bool,
}

impl Config {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every rule the server relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_webserver()?;
        self.validate_lnurl()?;
        self.validate_usernames()?;
        self.validate_lnd()
    }

    fn validate_webserver(&self) -> Result<(), ConfigError> {
        let web = &self.webserver;

        if web.autocert_domains.is_empty() {
            if web.autocert_dir.is_some() {
                return Err(ConfigError::Invalid(
                    "'webserver.autocert_dir' requires 'webserver.autocert_domains'".to_string(),
                ));
            }
            parse_bind_address(web.bind_address.as_deref())?;
            if web.tls_cert_file.is_some() != web.tls_key_file.is_some() {
                return Err(ConfigError::Invalid(
                    "'webserver.tls_cert_file' and 'webserver.tls_key_file' must be set together"
                        .to_string(),
                ));
            }
            return Ok(());
        }

        if web.autocert_dir.is_none() {
            return Err(ConfigError::Missing("webserver.autocert_dir"));
        }
        if web.bind_address.is_some() {
            return Err(ConfigError::Invalid(
                "'webserver.bind_address' cannot be used with autocert, it always listens on ports 443 and 80"
                    .to_string(),
            ));
        }
        if web.tls_cert_file.is_some() || web.tls_key_file.is_some() {
            return Err(ConfigError::Invalid(
                "'webserver.tls_cert_file' and 'webserver.tls_key_file' cannot be used with autocert"
                    .to_string(),
            ));
        }
        if web.autocert_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "'webserver.autocert_domains' contains an empty domain".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_lnurl(&self) -> Result<(), ConfigError> {
        let lnurl = &self.lnurl;

        if lnurl.url_authority.is_empty() {
            return Err(ConfigError::Missing("lnurl.url_authority"));
        }
        if lnurl.icon_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing("lnurl.icon_file"));
        }
        if lnurl.max_pay_request_sats == 0 {
            return Err(ConfigError::Missing("lnurl.max_pay_request_sats"));
        }
        if lnurl.min_pay_request_sats == 0 {
            return Err(ConfigError::Missing("lnurl.min_pay_request_sats"));
        }
        if lnurl.min_pay_request_sats > lnurl.max_pay_request_sats {
            return Err(ConfigError::Invalid(format!(
                "'lnurl.min_pay_request_sats' ({}) is greater than 'lnurl.max_pay_request_sats' ({})",
                lnurl.min_pay_request_sats, lnurl.max_pay_request_sats
            )));
        }
        if lnurl.max_pay_request_sats.checked_mul(1000).is_none() {
            return Err(ConfigError::Invalid(
                "'lnurl.max_pay_request_sats' overflows when converted to millisatoshis".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_usernames(&self) -> Result<(), ConfigError> {
        if self.lightning_address_usernames.is_empty() {
            return Err(ConfigError::Missing("lightning_address_usernames"));
        }

        let mut seen = HashSet::new();
        for username in &self.lightning_address_usernames {
            if username.is_empty() || username.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "invalid lightning address username {username:?}"
                )));
            }
            if !seen.insert(username.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate lightning address username {username:?}"
                )));
            }
        }
        Ok(())
    }

    fn validate_lnd(&self) -> Result<(), ConfigError> {
        if self.lnd.host.is_empty() {
            return Err(ConfigError::Missing("lnd.host"));
        }
        if self.lnd.macaroon_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing("lnd.macaroon_file"));
        }
        if self.lnd.tls_cert_file.is_none() && !self.lnd.unsafe_allow_plaintext {
            return Err(ConfigError::Invalid(
                "'lnd.tls_cert_file' is required unless 'lnd.unsafe_allow_plaintext' is set"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Pick the listener strategy. Call on a validated config.
    pub fn tls_strategy(&self) -> Result<TlsStrategy, ConfigError> {
        let web = &self.webserver;

        if !web.autocert_domains.is_empty() {
            let cache_dir = web
                .autocert_dir
                .clone()
                .ok_or(ConfigError::Missing("webserver.autocert_dir"))?;
            return Ok(TlsStrategy::Automatic(AutocertSettings {
                domains: web.autocert_domains.clone(),
                cache_dir,
                contact: web.autocert_email.clone(),
                staging: web.autocert_staging,
            }));
        }

        let bind = parse_bind_address(web.bind_address.as_deref())?;
        match (&web.tls_cert_file, &web.tls_key_file) {
            (Some(cert_file), Some(key_file)) => Ok(TlsStrategy::Static {
                bind,
                cert_file: cert_file.clone(),
                key_file: key_file.clone(),
            }),
            _ => Ok(TlsStrategy::Plaintext { bind }),
        }
    }

    /// Settings for the LNURL-pay service.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            url_authority: self.lnurl.url_authority.clone(),
            short_description: self.lnurl.short_description.clone(),
            pay_range: PayRange::new(
                self.lnurl.min_pay_request_sats,
                self.lnurl.max_pay_request_sats,
            ),
            invoice_expiry: self.lnurl.invoice_expiry,
            usernames: self.lightning_address_usernames.clone(),
        }
    }

    /// Load the LND certificate and macaroon.
    pub fn lnd_config(&self) -> Result<LndConfig, LndError> {
        LndConfig::from_files(
            self.lnd.host.clone(),
            self.lnd.tls_cert_file.as_deref(),
            &self.lnd.macaroon_file,
            self.lnd.unsafe_allow_plaintext,
        )
    }

    /// Read the raw icon bytes.
    pub fn read_icon(&self) -> Result<Vec<u8>, ServerError> {
        std::fs::read(&self.lnurl.icon_file).map_err(|source| ServerError::Icon {
            path: self.lnurl.icon_file.clone(),
            source,
        })
    }
}

/// Accept `host:port`, `ip:port`, `[ipv6]:port` and `:port` (all interfaces).
///
/// Host names are resolved when the listener binds.
fn parse_bind_address(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing("webserver.bind_address"))?;
    let invalid = || {
        ConfigError::Invalid(format!(
            "'webserver.bind_address' is not a valid host:port address: {raw:?}"
        ))
    };

    let (host, port) = raw.rsplit_once(':').ok_or_else(invalid)?;
    port.parse::<u16>().map_err(|_| invalid())?;

    if host.is_empty() {
        return Ok(format!("0.0.0.0:{port}"));
    }
    let bracketed = host.starts_with('[') && host.ends_with(']');
    if host.contains(':') && !bracketed {
        return Err(invalid());
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAINTEXT: &str = r#"
webserver:
  bind_address: "127.0.0.1:8080"
lnurl:
  url_authority: https://example.com
  icon_file: icon.png
  short_description: "Tips welcome"
  max_pay_request_sats: 10000
  min_pay_request_sats: 100
  invoice_expiry: 10m
lightning_address_usernames: [alice, bob]
lnd:
  host: "127.0.0.1:8080"
  tls_cert_file: tls.cert
  macaroon_file: invoice.macaroon
"#;

    fn base() -> Config {
        Config::from_yaml(PLAINTEXT).unwrap()
    }

    fn autocert() -> Config {
        let mut config = base();
        config.webserver.bind_address = None;
        config.webserver.autocert_domains = vec!["example.com".to_string()];
        config.webserver.autocert_dir = Some(PathBuf::from("/var/lib/lnurl/autocert"));
        config
    }

    fn assert_missing(config: Config, field: &str) {
        match config.validate() {
            Err(ConfigError::Missing(name)) => assert_eq!(name, field),
            other => panic!("expected missing {field}, got {other:?}"),
        }
    }

    fn assert_invalid(config: Config) {
        match config.validate() {
            Err(ConfigError::Invalid(_)) => {}
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_plaintext_config() {
        let config = base();

        assert_eq!(config.lnurl.invoice_expiry, Duration::from_secs(600));
        assert_eq!(config.lightning_address_usernames, vec!["alice", "bob"]);
        assert!(!config.lnd.unsafe_allow_plaintext);

        match config.tls_strategy().unwrap() {
            TlsStrategy::Plaintext { bind } => assert_eq!(bind, "127.0.0.1:8080"),
            other => panic!("unexpected strategy {other:?}"),
        }
    }

    #[test]
    fn test_static_strategy() {
        let mut config = base();
        config.webserver.tls_cert_file = Some(PathBuf::from("cert.pem"));
        config.webserver.tls_key_file = Some(PathBuf::from("key.pem"));
        config.validate().unwrap();

        match config.tls_strategy().unwrap() {
            TlsStrategy::Static { cert_file, key_file, .. } => {
                assert_eq!(cert_file, PathBuf::from("cert.pem"));
                assert_eq!(key_file, PathBuf::from("key.pem"));
            }
            other => panic!("unexpected strategy {other:?}"),
        }
    }

    #[test]
    fn test_automatic_strategy() {
        let mut config = autocert();
        config.webserver.autocert_email = Some("ops@example.com".to_string());
        config.validate().unwrap();

        match config.tls_strategy().unwrap() {
            TlsStrategy::Automatic(settings) => {
                assert_eq!(settings.domains, vec!["example.com"]);
                assert_eq!(settings.contact.as_deref(), Some("ops@example.com"));
                assert!(!settings.staging);
            }
            other => panic!("unexpected strategy {other:?}"),
        }
    }

    #[test]
    fn test_service_config() {
        let service = base().service_config();
        assert_eq!(service.pay_range.min_sendable_msat(), 100_000);
        assert_eq!(service.pay_range.max_sendable_msat(), 10_000_000);
        assert_eq!(service.invoice_expiry, Duration::from_secs(600));
        assert_eq!(service.usernames.len(), 2);
    }

    #[test]
    fn test_autocert_requires_dir() {
        let mut config = autocert();
        config.webserver.autocert_dir = None;
        assert_missing(config, "webserver.autocert_dir");
    }

    #[test]
    fn test_autocert_dir_requires_domains() {
        let mut config = base();
        config.webserver.autocert_dir = Some(PathBuf::from("/tmp/certs"));
        assert_invalid(config);
    }

    #[test]
    fn test_autocert_excludes_bind_address() {
        let mut config = autocert();
        config.webserver.bind_address = Some("0.0.0.0:443".to_string());
        assert_invalid(config);
    }

    #[test]
    fn test_autocert_excludes_static_certs() {
        let mut config = autocert();
        config.webserver.tls_cert_file = Some(PathBuf::from("cert.pem"));
        assert_invalid(config);
    }

    #[test]
    fn test_bind_address_required() {
        let mut config = base();
        config.webserver.bind_address = None;
        assert_missing(config, "webserver.bind_address");
    }

    #[test]
    fn test_bind_address_must_parse() {
        let mut config = base();
        config.webserver.bind_address = Some("localhost".to_string());
        assert_invalid(config);
    }

    #[test]
    fn test_bind_address_forms() {
        let cases = [
            (":8080", "0.0.0.0:8080"),
            ("localhost:8080", "localhost:8080"),
            ("0.0.0.0:443", "0.0.0.0:443"),
            ("[::1]:8080", "[::1]:8080"),
        ];
        for (raw, expected) in cases {
            let mut config = base();
            config.webserver.bind_address = Some(raw.to_string());
            config.validate().unwrap();

            match config.tls_strategy().unwrap() {
                TlsStrategy::Plaintext { bind } => assert_eq!(bind, expected, "{raw}"),
                other => panic!("unexpected strategy {other:?}"),
            }
        }
    }

    #[test]
    fn test_bind_address_needs_valid_port() {
        for raw in ["localhost:http", "localhost:70000", "::1:8080", "example.com:"] {
            let mut config = base();
            config.webserver.bind_address = Some(raw.to_string());
            assert_invalid(config);
        }
    }

    #[test]
    fn test_cert_and_key_together() {
        let mut config = base();
        config.webserver.tls_key_file = Some(PathBuf::from("key.pem"));
        assert_invalid(config);
    }

    #[test]
    fn test_lnurl_required_fields() {
        let mut config = base();
        config.lnurl.url_authority.clear();
        assert_missing(config, "lnurl.url_authority");

        let mut config = base();
        config.lnurl.icon_file = PathBuf::new();
        assert_missing(config, "lnurl.icon_file");

        let mut config = base();
        config.lnurl.max_pay_request_sats = 0;
        assert_missing(config, "lnurl.max_pay_request_sats");

        let mut config = base();
        config.lnurl.min_pay_request_sats = 0;
        assert_missing(config, "lnurl.min_pay_request_sats");
    }

    #[test]
    fn test_invoice_expiry_defaults_to_backend() {
        let yaml = PLAINTEXT.replace("  invoice_expiry: 10m\n", "");
        let config = Config::from_yaml(&yaml).unwrap();

        assert_eq!(config.lnurl.invoice_expiry, Duration::ZERO);
        assert_eq!(config.service_config().invoice_expiry, Duration::ZERO);
    }

    #[test]
    fn test_pay_range_rules() {
        let mut config = base();
        config.lnurl.min_pay_request_sats = 20_000;
        assert_invalid(config);

        let mut config = base();
        config.lnurl.max_pay_request_sats = u64::MAX / 10;
        assert_invalid(config);

        let mut config = base();
        config.lnurl.min_pay_request_sats = 10_000;
        config.validate().unwrap();
    }

    #[test]
    fn test_username_rules() {
        let mut config = base();
        config.lightning_address_usernames.clear();
        assert_missing(config, "lightning_address_usernames");

        let mut config = base();
        config.lightning_address_usernames.push("alice".to_string());
        assert_invalid(config);

        let mut config = base();
        config.lightning_address_usernames.push(String::new());
        assert_invalid(config);
    }

    #[test]
    fn test_lnd_rules() {
        let mut config = base();
        config.lnd.host.clear();
        assert_missing(config, "lnd.host");

        let mut config = base();
        config.lnd.macaroon_file = PathBuf::new();
        assert_missing(config, "lnd.macaroon_file");

        let mut config = base();
        config.lnd.tls_cert_file = None;
        assert_invalid(config);

        let mut config = base();
        config.lnd.tls_cert_file = None;
        config.lnd.unsafe_allow_plaintext = true;
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, PLAINTEXT).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.lnurl.url_authority, "https://example.com");

        let err = Config::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("lnurl: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_icon_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = base();
        config.lnurl.icon_file = dir.path().join("icon.png");

        let err = config.read_icon().unwrap_err();
        assert!(err.to_string().starts_with("unable to open icon_file"));
    }
}
