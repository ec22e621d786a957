//! 注册描述符

use crate::artifact::{Artifact, Instance};
use crate::resolver::{Cradle, ResolverOptions};
use autoload_common::{DependencyError, Lifetime};
use serde::{Deserialize, Serialize};

/// 注册策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStrategy {
    /// 以类方式构造
    Class,
    /// 以函数方式调用
    Function,
}

impl std::fmt::Display for RegistrationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// 传给容器的描述符选项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorOptions {
    /// 生命周期
    pub lifetime: Lifetime,
    /// 透传选项
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DescriptorOptions {
    /// 由解析器选项构建，`register` 字段不会被带入
    ///
    /// 制品自身标注的生命周期优先于调用级选项
    pub fn from_resolver_options(
        options: &ResolverOptions,
        inline_lifetime: Option<Lifetime>,
    ) -> Self {
        Self {
            lifetime: inline_lifetime.or(options.lifetime).unwrap_or_default(),
            extra: options.extra.clone(),
        }
    }
}

/// 注册描述符
#[derive(Clone)]
pub struct RegistrationDescriptor {
    /// 注册策略
    pub strategy: RegistrationStrategy,
    /// 被注册的制品
    pub artifact: Artifact,
    /// 选项
    pub options: DescriptorOptions,
}

impl std::fmt::Debug for RegistrationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationDescriptor")
            .field("strategy", &self.strategy)
            .field("artifact", &self.artifact.type_name())
            .field("options", &self.options)
            .finish()
    }
}

impl RegistrationDescriptor {
    /// 创建新的描述符
    pub fn new(
        strategy: RegistrationStrategy,
        artifact: Artifact,
        options: DescriptorOptions,
    ) -> Self {
        Self {
            strategy,
            artifact,
            options,
        }
    }

    /// 以类方式注册
    pub fn class(artifact: Artifact) -> Self {
        Self::new(RegistrationStrategy::Class, artifact, DescriptorOptions::default())
    }

    /// 以函数方式注册
    pub fn function(artifact: Artifact) -> Self {
        Self::new(RegistrationStrategy::Function, artifact, DescriptorOptions::default())
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.options.lifetime = lifetime;
        self
    }

    /// 按注册策略创建实例
    pub fn instantiate(&self, cradle: &dyn Cradle) -> Result<Instance, DependencyError> {
        match self.strategy {
            RegistrationStrategy::Class => self.artifact.construct(cradle),
            RegistrationStrategy::Function => self.artifact.invoke(cradle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_lifetime_wins() {
        let options = ResolverOptions::new()
            .with_register(RegistrationStrategy::Function)
            .with_lifetime(Lifetime::Scoped)
            .with_option("injectionMode", json!("CLASSIC"));

        let descriptor_options =
            DescriptorOptions::from_resolver_options(&options, Some(Lifetime::Singleton));
        assert_eq!(descriptor_options.lifetime, Lifetime::Singleton);
        assert_eq!(descriptor_options.extra.get("injectionMode"), Some(&json!("CLASSIC")));

        let descriptor_options = DescriptorOptions::from_resolver_options(&options, None);
        assert_eq!(descriptor_options.lifetime, Lifetime::Scoped);
    }

    #[test]
    fn test_lifetime_defaults_to_transient() {
        let descriptor_options =
            DescriptorOptions::from_resolver_options(&ResolverOptions::default(), None);
        assert_eq!(descriptor_options.lifetime, Lifetime::Transient);
        assert!(descriptor_options.extra.is_empty());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(RegistrationStrategy::Class.to_string(), "class");
        assert_eq!(RegistrationStrategy::Function.to_string(), "function");
    }
}
