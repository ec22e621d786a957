//! # 依赖注入具体实现
//!
//! 提供基于名称的内存容器，实现 [`ModuleContainer`]

use autoload_common::DependencyError;
use di_abstractions::{
    ContainerConfig, Cradle, Instance, ModuleContainer, RegistrationDescriptor,
    RegistrationStrategy, ResolveContext,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 组件注册信息
#[derive(Debug, Clone)]
struct ComponentRegistration {
    /// 注册描述符
    descriptor: RegistrationDescriptor,
    /// 缓存的实例（单例与作用域生命周期）
    cached: Arc<Mutex<Option<Instance>>>,
}

/// 注册表
#[derive(Debug, Default)]
struct Registry {
    entries: HashMap<String, ComponentRegistration>,
    /// 首次注册的顺序
    order: Vec<String>,
}

/// 具体的依赖注入容器实现
///
/// 根容器同时充当作用域，`Scoped` 组件在其中与单例一样被缓存
#[derive(Debug, Default)]
pub struct DiContainerImpl {
    config: ContainerConfig,
    registry: RwLock<Registry>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            registry: RwLock::new(Registry::default()),
        }
    }

    /// 已注册的组件数量
    pub fn registration_count(&self) -> usize {
        self.registry.read().entries.len()
    }

    /// 按首次注册顺序返回所有名称
    pub fn registered_names(&self) -> Vec<String> {
        self.registry.read().order.clone()
    }

    /// 获取指定名称的注册策略
    pub fn descriptor_strategy(&self, name: &str) -> Option<RegistrationStrategy> {
        self.registry
            .read()
            .entries
            .get(name)
            .map(|registration| registration.descriptor.strategy)
    }

    fn resolve_in(
        &self,
        name: &str,
        mut context: ResolveContext,
    ) -> Result<Instance, DependencyError> {
        let registration = self
            .registry
            .read()
            .entries
            .get(name)
            .cloned()
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                name: name.to_string(),
            })?;

        let cached = registration.descriptor.options.lifetime.is_cached();
        if cached {
            if let Some(instance) = registration.cached.lock().as_ref() {
                return Ok(instance.clone());
            }
        }

        if self.config.enable_circular_dependency_detection {
            context.push_name(name)?;
        }

        debug!(
            "创建组件实例: {} ({}, {})",
            name,
            registration.descriptor.artifact.type_name(),
            registration.descriptor.strategy
        );
        let cradle = ResolutionCradle {
            container: self,
            context,
        };
        let instance = registration.descriptor.instantiate(&cradle)?;

        if cached {
            let mut slot = registration.cached.lock();
            return Ok(slot.get_or_insert(instance).clone());
        }
        Ok(instance)
    }
}

impl ModuleContainer for DiContainerImpl {
    fn register(
        &self,
        name: &str,
        descriptor: RegistrationDescriptor,
    ) -> Result<(), DependencyError> {
        info!(
            "注册组件: {} ({}, {:?})",
            name,
            descriptor.strategy,
            descriptor.options.lifetime
        );

        let registration = ComponentRegistration {
            descriptor,
            cached: Arc::new(Mutex::new(None)),
        };

        let mut registry = self.registry.write();
        let replaced = registry.entries.insert(name.to_string(), registration);
        if replaced.is_some() {
            warn!("覆盖已有注册: {}", name);
        } else {
            registry.order.push(name.to_string());
        }
        Ok(())
    }

    fn has_registration(&self, name: &str) -> bool {
        self.registry.read().entries.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Result<Instance, DependencyError> {
        self.resolve_in(name, ResolveContext::new(self.config.max_resolution_depth))
    }
}

/// 单次解析过程中交给制品的依赖视图
struct ResolutionCradle<'a> {
    container: &'a DiContainerImpl,
    context: ResolveContext,
}

impl Cradle for ResolutionCradle<'_> {
    fn resolve(&self, name: &str) -> Result<Instance, DependencyError> {
        self.container.resolve_in(name, self.context.clone())
    }
}
