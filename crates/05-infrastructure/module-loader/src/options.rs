//! 加载选项

use crate::naming::NameFormatter;
use crate::strategy::ClassDetector;
use autoload_common::Lifetime;
use di_abstractions::{Artifact, RegistrationStrategy, ResolverOptions};
use std::sync::Arc;

/// 加载选项
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// 解析器选项，`register` 之外的字段透传给容器
    pub resolver_options: ResolverOptions,
    /// 自定义名称格式化函数
    pub format_name: Option<NameFormatter>,
    /// 自定义类检测谓词
    pub class_detector: Option<ClassDetector>,
}

impl std::fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadOptions")
            .field("resolver_options", &self.resolver_options)
            .field("format_name", &self.format_name.as_ref().map(|_| "<function>"))
            .field("class_detector", &self.class_detector.as_ref().map(|_| "<function>"))
            .finish()
    }
}

impl LoadOptions {
    /// 创建默认选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置解析器选项
    pub fn with_resolver_options(mut self, resolver_options: ResolverOptions) -> Self {
        self.resolver_options = resolver_options;
        self
    }

    /// 设置显式注册策略
    pub fn with_register(mut self, strategy: RegistrationStrategy) -> Self {
        self.resolver_options.register = Some(strategy);
        self
    }

    /// 设置生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.resolver_options.lifetime = Some(lifetime);
        self
    }

    /// 设置名称格式化函数
    pub fn with_format_name<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.format_name = Some(Arc::new(formatter));
        self
    }

    /// 设置类检测谓词
    pub fn with_class_detector<F>(mut self, detector: F) -> Self
    where
        F: Fn(&Artifact) -> bool + Send + Sync + 'static,
    {
        self.class_detector = Some(Arc::new(detector));
        self
    }
}
