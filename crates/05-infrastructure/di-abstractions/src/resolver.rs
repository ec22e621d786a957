//! 组件解析抽象接口
//!
//! 提供依赖解析上下文和解析选项

use crate::artifact::Instance;
use crate::registry::RegistrationStrategy;
use autoload_common::{DependencyError, Lifetime};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// 依赖视图
///
/// 制品被构造或调用时，通过它按名称获取自己的依赖
pub trait Cradle {
    /// 按名称解析组件
    fn resolve(&self, name: &str) -> Result<Instance, DependencyError>;
}

impl dyn Cradle + '_ {
    /// 按名称解析并转换为具体类型
    pub fn resolve_as<T>(&self, name: &str) -> Result<Arc<T>, DependencyError>
    where
        T: Any + Send + Sync,
    {
        downcast_instance(name, self.resolve(name)?)
    }
}

/// 将实例转换为具体类型
pub fn downcast_instance<T>(name: &str, instance: Instance) -> Result<Arc<T>, DependencyError>
where
    T: Any + Send + Sync,
{
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// 解析上下文
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    pub resolution_chain: Vec<String>,
    /// 最大递归深度
    pub max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            max_depth,
        }
    }

    /// 添加名称到解析链
    pub fn push_name(&mut self, name: &str) -> Result<(), DependencyError> {
        if self.resolution_chain.iter().any(|entry| entry == name) {
            return Err(DependencyError::CircularDependency {
                dependency_chain: format!("{} -> {}", self.resolution_chain.join(" -> "), name),
            });
        }
        if self.resolution_chain.len() >= self.max_depth {
            return Err(DependencyError::DependencyResolutionFailed {
                type_name: name.to_string(),
                message: format!("超过最大解析深度 {}", self.max_depth),
            });
        }
        self.resolution_chain.push(name.to_string());
        Ok(())
    }

    /// 从解析链中移除最后一个名称
    pub fn pop_name(&mut self) {
        self.resolution_chain.pop();
    }
}

/// 解析器选项
///
/// `register` 决定注册策略；其余字段原样传给容器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// 显式注册策略，对整个调用生效
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<RegistrationStrategy>,
    /// 生命周期
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<Lifetime>,
    /// 其余透传选项
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResolverOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置注册策略
    pub fn with_register(mut self, strategy: RegistrationStrategy) -> Self {
        self.register = Some(strategy);
        self
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// 添加透传选项
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
