//! 加载器配置
//!
//! 通过 config crate 从配置文件与环境变量绑定加载器设置

use crate::loader::{ModuleLoader, SupplyMode};
use crate::options::LoadOptions;
use autoload_common::{ConfigError, ConfigResult};
use di_abstractions::ResolverOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 默认配置文件（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/autoload";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "AUTOLOAD";

/// 加载器设置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// 模块供给方式
    #[serde(default)]
    pub mode: SupplyMode,
    /// 解析器选项
    #[serde(default)]
    pub resolver_options: ResolverOptions,
}

impl LoaderSettings {
    /// 从默认配置文件和环境变量加载
    pub fn load() -> ConfigResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));
        Self::build(builder)
    }

    /// 从指定配置文件和环境变量加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载加载器配置文件: {}", path.display());
        let builder = config::Config::builder()
            .add_source(config::File::from(path));
        Self::build(builder)
    }

    /// 从已构建的配置中绑定
    pub fn from_config(settings: &config::Config) -> ConfigResult<Self> {
        settings.clone().try_deserialize().map_err(|e| {
            error!("加载器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigResult<Self> {
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                error!("加载器配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        Self::from_config(&settings)
    }

    /// 转换为加载选项
    pub fn to_options(&self) -> LoadOptions {
        LoadOptions::new()
            .with_resolver_options(self.resolver_options.clone())
    }

    /// 构建加载器
    pub fn into_loader(self) -> ModuleLoader {
        let options = self.to_options();
        ModuleLoader::new()
            .with_mode(self.mode)
            .with_options(options)
    }
}
