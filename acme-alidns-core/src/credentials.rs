//! 凭证文件加载
//!
//! certbot 风格的 INI 文件：
//!
//! ```ini
//! # AliCloud API credentials
//! dns_alicloud_access_key = LTAI4Fxxxxxxxxxxxxxx
//! dns_alicloud_secret_key = 0123456789abcdef0123456789abcdef
//! dns_alicloud_region = cn-hangzhou
//! ```

use std::path::Path;

use config::{Config, File, FileFormat};

use acme_alidns_provider::{DEFAULT_REGION, ProviderSession};

use crate::error::{CoreError, CoreResult};

const KEY_PREFIX: &str = "dns_alicloud_";

/// 必填属性：(名称, 说明)
const REQUIRED: [(&str, &str); 2] = [
    ("access_key", "AliCloud Access Key"),
    ("secret_key", "AliCloud Secret Key"),
];

/// 凭证文件中的 AccessKey 与地域
#[derive(Clone, PartialEq, Eq)]
pub struct ChallengeCredentials {
    pub access_key: String,
    pub secret_key: String,
    /// `None` 表示使用 [`DEFAULT_REGION`]
    pub region: Option<String>,
}

impl ChallengeCredentials {
    #[must_use]
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region,
        }
    }

    /// 从文件加载凭证
    ///
    /// Unix 下文件对 group/other 可读时只打印警告，不拒绝加载。
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::Credential(format!(
                "File not found: {}",
                path.display()
            )));
        }
        warn_unsafe_permissions(path);

        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Credential(format!(
                "Error parsing credentials configuration '{}': {e}",
                path.display()
            ))
        })?;

        Self::from_ini(&content, &path.display().to_string())
    }

    /// 解析 INI 内容
    pub fn parse(content: &str) -> CoreResult<Self> {
        Self::from_ini(content, "<string>")
    }

    fn from_ini(content: &str, origin: &str) -> CoreResult<Self> {
        let conf = Config::builder()
            .add_source(File::from_str(content, FileFormat::Ini))
            .build()
            .map_err(|e| {
                CoreError::Credential(format!(
                    "Error parsing credentials configuration '{origin}': {e}"
                ))
            })?;
        let get = |name: &str| {
            conf.get_string(&format!("{KEY_PREFIX}{name}"))
                .ok()
                .map(|v| clean_value(&v))
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|&&(name, _)| get(name).is_none())
            .map(|&(name, description)| {
                format!(" * Property \"{KEY_PREFIX}{name}\" not found (should be {description}).")
            })
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Credential(format!(
                "Missing {} in credentials configuration file {origin}:\n{}",
                if missing.len() > 1 { "properties" } else { "property" },
                missing.join("\n")
            )));
        }

        Ok(Self {
            access_key: get("access_key").unwrap_or_default(),
            secret_key: get("secret_key").unwrap_or_default(),
            region: get("region"),
        })
    }

    /// 实际使用的地域
    #[must_use]
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// 为单次 publish/cleanup 构建新的会话
    #[must_use]
    pub fn to_session(&self, endpoint: Option<&str>) -> ProviderSession {
        let session = ProviderSession::new(&self.access_key, &self.secret_key, self.region());
        match endpoint {
            Some(endpoint) => session.with_endpoint(endpoint),
            None => session,
        }
    }
}

impl std::fmt::Debug for ChallengeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChallengeCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

/// 去掉引号和行内注释
///
/// 带引号的值取引号内全部内容；不带引号的值在 `#` 处截断。
fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if let Some((inner, _)) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.split_once(quote))
        {
            return inner.to_string();
        }
    }
    value
        .split_once('#')
        .map_or(value, |(before, _)| before)
        .trim_end()
        .to_string()
}

#[cfg(unix)]
fn warn_unsafe_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            log::warn!(
                "Unsafe permissions on credentials configuration file: {} (mode {:o})",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_unsafe_permissions(_path: &Path) {}
