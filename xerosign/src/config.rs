use super::constants::*;
use std::fmt;
use std::str::FromStr;
use xerosign_core::{Context, Error};

/// The Xero application trust model.
///
/// The app type decides the signature method and the token defaults: private
/// and partner apps sign with RSA-SHA1 and behave as already-authorized,
/// while public apps sign with HMAC-SHA1 and must run the full 3-legged
/// authorization flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppType {
    /// Single-organisation app with a pre-authorized permanent token pair.
    Private,
    /// Multi-organisation app using the standard 3-legged flow.
    Public,
    /// Partner app; signs like a private app but exchanges tokens like a public one.
    Partner,
}

impl AppType {
    /// The lowercase wire name of this app type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::Private => "private",
            AppType::Public => "public",
            AppType::Partner => "partner",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(AppType::Private),
            "public" => Ok(AppType::Public),
            "partner" => Ok(AppType::Partner),
            _ => Err(Error::config_invalid(format!(
                "unsupported app type: {s}"
            ))),
        }
    }
}

/// Config carries all the configuration for Xero applications.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `app_type` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`XERO_APP_TYPE`]
    pub app_type: Option<String>,
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`XERO_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`XERO_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `private_key_file` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`XERO_PRIVATE_KEY_FILE`]
    ///
    /// Only meaningful for private and partner apps.
    pub private_key_file: Option<String>,
    /// `private_key` holds PEM content directly and takes precedence over
    /// [`Config::private_key_file`].
    pub private_key: Option<String>,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(XERO_APP_TYPE) {
            self.app_type.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(XERO_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(XERO_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(XERO_PRIVATE_KEY_FILE) {
            self.private_key_file.get_or_insert(v);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_type_from_str() {
        assert_eq!("private".parse::<AppType>().unwrap(), AppType::Private);
        assert_eq!("public".parse::<AppType>().unwrap(), AppType::Public);
        assert_eq!("Partner".parse::<AppType>().unwrap(), AppType::Partner);

        let err = "enterprise".parse::<AppType>().unwrap_err();
        assert_eq!(err.kind(), xerosign_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_config_from_env() {
        use std::collections::HashMap;
        use xerosign_core::StaticEnv;

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (XERO_APP_TYPE.to_string(), "public".to_string()),
                (XERO_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (XERO_CONSUMER_SECRET.to_string(), "env_secret".to_string()),
            ]),
        });

        let config = Config {
            consumer_key: Some("explicit_key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        // Explicit fields win over the environment.
        assert_eq!(config.consumer_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.consumer_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.app_type.as_deref(), Some("public"));
        assert!(config.private_key_file.is_none());
    }
}
