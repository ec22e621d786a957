//! 模块加载编排
//!
//! 两个入口对应两种模块供给方式：
//!
//! - [`load_modules`] 接受已加载或延迟加载的模块，先并发等待全部延迟模块完成，再按映射顺序注册
//! - [`load_modules_eager`] 只接受已加载的模块，发现延迟模块时在任何注册之前失败
//!
//! 所有条目都先完成名称解析与制品选择，然后才开始注册。

use crate::module::{ModuleMap, ModuleSource, ModuleValue};
use crate::naming::format_name;
use crate::options::LoadOptions;
use crate::selector::select_artifact;
use crate::settings::LoaderSettings;
use crate::strategy::select_strategy;
use autoload_common::{LoaderError, LoaderResult};
use di_abstractions::{DescriptorOptions, ModuleContainer, RegistrationDescriptor};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// 模块供给方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyMode {
    /// 允许延迟加载的模块
    #[default]
    Deferred,
    /// 只允许已加载的模块
    Eager,
}

/// 待注册条目
#[derive(Debug)]
struct PlannedRegistration {
    name: String,
    descriptor: RegistrationDescriptor,
}

/// 加载模块并注册到容器，允许延迟加载的模块
///
/// 所有延迟模块同时开始加载，任一失败则整个调用失败且不发生注册。
/// 注册顺序始终跟随映射的插入顺序，与加载完成的先后无关。
pub async fn load_modules<C>(
    container: &C,
    modules: ModuleMap,
    options: &LoadOptions,
) -> LoaderResult<()>
where
    C: ModuleContainer + ?Sized,
{
    debug!("开始加载 {} 个模块", modules.len());

    let pending = modules.into_iter().map(|(path, source)| async move {
        match source.resolve().await {
            Ok(module) => Ok((path, module)),
            Err(source) => {
                error!("模块加载失败: {}, 原因: {}", path, source);
                Err(LoaderError::ModuleLoad { path, source })
            }
        }
    });
    let loaded = try_join_all(pending).await?;

    register_loaded(container, loaded, options)
}

/// 同步注册已加载的模块
///
/// 只要有一个模块是延迟加载的，就在触碰容器之前返回
/// [`LoaderError::EagerModeViolation`]。
pub fn load_modules_eager<C>(
    container: &C,
    modules: ModuleMap,
    options: &LoadOptions,
) -> LoaderResult<()>
where
    C: ModuleContainer + ?Sized,
{
    let mut loaded = Vec::with_capacity(modules.len());
    let mut lazy_paths = Vec::new();
    for (path, source) in modules {
        match source {
            ModuleSource::Loaded(module) => loaded.push((path, module)),
            ModuleSource::Lazy(_) => lazy_paths.push(path),
        }
    }

    if !lazy_paths.is_empty() {
        warn!("同步加载模式下发现 {} 个延迟加载的模块", lazy_paths.len());
        return Err(LoaderError::eager_mode_violation(lazy_paths));
    }

    register_loaded(container, loaded, options)
}

fn register_loaded<C>(
    container: &C,
    loaded: Vec<(String, ModuleValue)>,
    options: &LoadOptions,
) -> LoaderResult<()>
where
    C: ModuleContainer + ?Sized,
{
    let planned = plan_registrations(loaded, options)?;
    let count = planned.len();

    for registration in planned {
        container.register(&registration.name, registration.descriptor)?;
    }

    info!("模块加载完成，注册了 {} 个组件", count);
    Ok(())
}

fn plan_registrations(
    loaded: Vec<(String, ModuleValue)>,
    options: &LoadOptions,
) -> LoaderResult<Vec<PlannedRegistration>> {
    let explicit = options.resolver_options.register;
    let mut seen = HashSet::new();
    let mut planned = Vec::with_capacity(loaded.len());

    for (path, module) in loaded {
        let selected = select_artifact(&path, &module)?;

        let name = format_name(&selected.name, options.format_name.as_ref());
        if name.is_empty() {
            return Err(LoaderError::EmptyName { path });
        }

        let strategy = select_strategy(
            &selected.artifact,
            explicit,
            options.class_detector.as_ref(),
        );
        let inline_lifetime = selected.marker.as_ref().and_then(|marker| marker.lifetime);
        let descriptor_options =
            DescriptorOptions::from_resolver_options(&options.resolver_options, inline_lifetime);

        debug!(
            "解析模块: {} -> {} ({:?}, {})",
            path, name, selected.kind, strategy
        );
        if !seen.insert(name.clone()) {
            warn!("注册名称重复: {}，后注册的条目将覆盖先前的条目", name);
        }

        planned.push(PlannedRegistration {
            name,
            descriptor: RegistrationDescriptor::new(
                strategy,
                selected.artifact,
                descriptor_options,
            ),
        });
    }

    Ok(planned)
}

/// 模块加载器
///
/// 持有一次配置好的选项，可以反复对不同容器执行加载
#[derive(Debug, Clone, Default)]
pub struct ModuleLoader {
    mode: SupplyMode,
    options: LoadOptions,
}

impl ModuleLoader {
    /// 创建默认加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从默认配置文件和环境变量构建加载器
    pub fn from_default_config() -> LoaderResult<Self> {
        Ok(LoaderSettings::load()?.into_loader())
    }

    /// 从指定配置文件和环境变量构建加载器
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> LoaderResult<Self> {
        Ok(LoaderSettings::from_file(path)?.into_loader())
    }

    /// 设置供给方式
    pub fn with_mode(mut self, mode: SupplyMode) -> Self {
        self.mode = mode;
        self
    }

    /// 设置加载选项
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// 当前供给方式
    pub const fn mode(&self) -> SupplyMode {
        self.mode
    }

    /// 当前加载选项
    pub const fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// 按配置的供给方式加载
    pub async fn load<C>(&self, container: &C, modules: ModuleMap) -> LoaderResult<()>
    where
        C: ModuleContainer + ?Sized,
    {
        match self.mode {
            SupplyMode::Deferred => load_modules(container, modules, &self.options).await,
            SupplyMode::Eager => load_modules_eager(container, modules, &self.options),
        }
    }

    /// 同步加载已加载的模块
    pub fn load_eager<C>(&self, container: &C, modules: ModuleMap) -> LoaderResult<()>
    where
        C: ModuleContainer + ?Sized,
    {
        load_modules_eager(container, modules, &self.options)
    }
}
