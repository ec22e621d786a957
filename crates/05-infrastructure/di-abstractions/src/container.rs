//! 依赖注入容器抽象接口
//!
//! 加载器只通过这里的接口与外部容器交互

use crate::artifact::Instance;
use crate::registry::RegistrationDescriptor;
use crate::resolver::downcast_instance;
use autoload_common::DependencyError;
use std::any::Any;
use std::sync::Arc;

/// 可接收模块注册的容器 trait
///
/// 同名注册的覆盖语义由容器自身决定
pub trait ModuleContainer: Send + Sync {
    /// 注册组件
    fn register(
        &self,
        name: &str,
        descriptor: RegistrationDescriptor,
    ) -> Result<(), DependencyError>;

    /// 检查是否已注册指定名称
    fn has_registration(&self, name: &str) -> bool;

    /// 按名称解析组件
    fn resolve(&self, name: &str) -> Result<Instance, DependencyError>;
}

/// 容器便捷方法
pub trait ModuleContainerExt: ModuleContainer {
    /// 按名称解析并转换为具体类型
    fn resolve_as<T>(&self, name: &str) -> Result<Arc<T>, DependencyError>
    where
        T: Any + Send + Sync,
    {
        downcast_instance(name, self.resolve(name)?)
    }
}

impl<C: ModuleContainer + ?Sized> ModuleContainerExt for C {}

impl<C: ModuleContainer + ?Sized> ModuleContainer for Arc<C> {
    fn register(
        &self,
        name: &str,
        descriptor: RegistrationDescriptor,
    ) -> Result<(), DependencyError> {
        (**self).register(name, descriptor)
    }

    fn has_registration(&self, name: &str) -> bool {
        (**self).has_registration(name)
    }

    fn resolve(&self, name: &str) -> Result<Instance, DependencyError> {
        (**self).resolve(name)
    }
}

/// 容器配置
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// 是否启用循环依赖检测
    pub enable_circular_dependency_detection: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            enable_circular_dependency_detection: true,
            max_resolution_depth: 100,
        }
    }
}
