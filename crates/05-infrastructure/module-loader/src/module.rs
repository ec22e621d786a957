//! 模块数据模型
//!
//! 路径到模块的映射由调用方提供，加载器只读取

use autoload_common::{BoxError, Lifetime};
use di_abstractions::Artifact;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

/// 默认导出的键名
pub const DEFAULT_EXPORT: &str = "default";

/// 解析器标记
///
/// 附着在具名导出上，表明它是可注册的组件，同时携带内联的解析选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverMarker {
    /// 内联生命周期，优先于调用级选项
    pub lifetime: Option<Lifetime>,
}

impl ResolverMarker {
    /// 创建空标记
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置内联生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }
}

/// 带标记的组件
#[derive(Debug, Clone)]
pub struct TaggedProvider {
    pub artifact: Artifact,
    pub marker: ResolverMarker,
}

/// 模块导出值
#[derive(Debug, Clone)]
pub enum Export {
    /// 未标记的可调用值
    Callable(Artifact),
    /// 带解析器标记的可调用值
    Tagged(TaggedProvider),
    /// 不可调用的普通值
    Value(serde_json::Value),
}

impl Export {
    /// 未标记的可调用导出
    pub fn callable(artifact: Artifact) -> Self {
        Self::Callable(artifact)
    }

    /// 带默认标记的导出
    pub fn tagged(artifact: Artifact) -> Self {
        Self::tagged_with(artifact, ResolverMarker::default())
    }

    /// 带指定标记的导出
    pub fn tagged_with(artifact: Artifact, marker: ResolverMarker) -> Self {
        Self::Tagged(TaggedProvider { artifact, marker })
    }

    /// 普通值导出
    pub fn value(value: serde_json::Value) -> Self {
        Self::Value(value)
    }

    /// 可调用的制品（如果有）
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Callable(artifact) => Some(artifact),
            Self::Tagged(provider) => Some(&provider.artifact),
            Self::Value(_) => None,
        }
    }

    /// 解析器标记（如果有）
    pub fn marker(&self) -> Option<&ResolverMarker> {
        match self {
            Self::Tagged(provider) => Some(&provider.marker),
            _ => None,
        }
    }

    /// 是否可调用
    pub fn is_callable(&self) -> bool {
        self.artifact().is_some()
    }
}

/// 已加载的模块
///
/// 具名导出按插入顺序保存，重复插入同名导出时原位替换
#[derive(Debug, Clone, Default)]
pub struct ModuleValue {
    default: Option<Export>,
    named: Vec<(String, Export)>,
}

impl ModuleValue {
    /// 创建空模块
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置默认导出
    pub fn with_default(mut self, export: Export) -> Self {
        self.default = Some(export);
        self
    }

    /// 添加导出，键为 `default` 时设置默认导出
    pub fn with_export(mut self, key: impl Into<String>, export: Export) -> Self {
        self.insert(key, export);
        self
    }

    /// 插入导出
    pub fn insert(&mut self, key: impl Into<String>, export: Export) {
        let key = key.into();
        if key == DEFAULT_EXPORT {
            self.default = Some(export);
            return;
        }
        match self.named.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = export,
            None => self.named.push((key, export)),
        }
    }

    /// 默认导出
    pub fn default_export(&self) -> Option<&Export> {
        self.default.as_ref()
    }

    /// 按名称获取导出
    pub fn get(&self, key: &str) -> Option<&Export> {
        if key == DEFAULT_EXPORT {
            return self.default.as_ref();
        }
        self.named
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, export)| export)
    }

    /// 按枚举顺序遍历具名导出（不含默认导出）
    pub fn named_exports(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.named.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// 导出数量（含默认导出）
    pub fn len(&self) -> usize {
        self.named.len() + usize::from(self.default.is_some())
    }

    /// 是否没有任何导出
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 延迟模块工厂
pub type LazyModuleFactory =
    Box<dyn FnOnce() -> BoxFuture<'static, Result<ModuleValue, BoxError>> + Send>;

/// 模块来源
pub enum ModuleSource {
    /// 已加载的模块
    Loaded(ModuleValue),
    /// 延迟加载的模块
    Lazy(LazyModuleFactory),
}

impl std::fmt::Debug for ModuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(module) => f.debug_tuple("Loaded").field(module).finish(),
            Self::Lazy(_) => f.debug_tuple("Lazy").field(&"<factory>").finish(),
        }
    }
}

impl ModuleSource {
    /// 包装延迟加载的工厂
    pub fn lazy<F, Fut>(factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<ModuleValue, BoxError>> + Send + 'static,
    {
        Self::Lazy(Box::new(move || factory().boxed()))
    }

    /// 是否为延迟加载
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    /// 取得模块，必要时等待延迟加载完成
    pub async fn resolve(self) -> Result<ModuleValue, BoxError> {
        match self {
            Self::Loaded(module) => Ok(module),
            Self::Lazy(factory) => factory().await,
        }
    }
}

impl From<ModuleValue> for ModuleSource {
    fn from(module: ModuleValue) -> Self {
        Self::Loaded(module)
    }
}

/// 路径到模块的有序映射
///
/// 重复插入同一路径时原位替换，保持首次插入的位置
#[derive(Debug, Default)]
pub struct ModuleMap {
    entries: Vec<(String, ModuleSource)>,
}

impl ModuleMap {
    /// 创建空映射
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入模块
    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<ModuleSource>) {
        let path = path.into();
        let source = source.into();
        match self.entries.iter_mut().find(|(key, _)| *key == path) {
            Some((_, slot)) => *slot = source,
            None => self.entries.push((path, source)),
        }
    }

    /// 添加已加载的模块
    pub fn with_module(mut self, path: impl Into<String>, module: ModuleValue) -> Self {
        self.insert(path, module);
        self
    }

    /// 添加延迟加载的模块
    pub fn with_lazy<F, Fut>(mut self, path: impl Into<String>, factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<ModuleValue, BoxError>> + Send + 'static,
    {
        self.insert(path, ModuleSource::lazy(factory));
        self
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleSource)> {
        self.entries
            .iter()
            .map(|(path, source)| (path.as_str(), source))
    }

    /// 所有延迟加载模块的路径
    pub fn lazy_paths(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, source)| source.is_lazy())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// 模块数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ModuleMap {
    type Item = (String, ModuleSource);
    type IntoIter = std::vec::IntoIter<(String, ModuleSource)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<P, S> FromIterator<(P, S)> for ModuleMap
where
    P: Into<String>,
    S: Into<ModuleSource>,
{
    fn from_iter<I: IntoIterator<Item = (P, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, source) in iter {
            map.insert(path, source);
        }
        map
    }
}
