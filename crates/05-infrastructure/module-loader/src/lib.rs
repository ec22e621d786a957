//! # 模块自动注册
//!
//! 根据约定从“路径 → 模块”的映射中发现组件，并注册到依赖注入容器。
//!
//! ## 处理流程
//!
//! 1. 解析模块来源：延迟加载的模块并发等待，或在同步模式下校验全部已加载
//! 2. 从路径提取基础名称，例如 `./dir/fooBar.index.js` 得到 `fooBar`
//! 3. 选择制品：可调用的默认导出优先，其次是第一个带解析器标记的具名导出
//! 4. 格式化注册名称，默认仅将首字符转为小写
//! 5. 选择注册策略：显式指定，或按制品的构造语义检测
//! 6. 按映射顺序注册到容器
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_abstractions::Artifact;
//! use di_impl::DiContainerImpl;
//! use module_loader::{load_modules, Export, LoadOptions, ModuleMap, ModuleValue};
//!
//! struct UserService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let container = DiContainerImpl::new();
//! let modules = ModuleMap::new()
//!     .with_module(
//!         "./services/UserService.ts",
//!         ModuleValue::new().with_default(Export::callable(Artifact::class(|_| Ok(UserService)))),
//!     )
//!     .with_lazy("./services/mailer.ts", || async {
//!         Ok(ModuleValue::new().with_export("Mailer", Export::tagged(Artifact::function(|_| Ok(())))))
//!     });
//!
//! load_modules(&container, modules, &LoadOptions::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod module;
pub mod naming;
pub mod options;
pub mod selector;
pub mod settings;
pub mod strategy;

pub use loader::{load_modules, load_modules_eager, ModuleLoader, SupplyMode};
pub use module::{
    Export, LazyModuleFactory, ModuleMap, ModuleSource, ModuleValue, ResolverMarker,
    TaggedProvider, DEFAULT_EXPORT,
};
pub use naming::{default_format_name, extract_base_name, format_name, NameFormatter};
pub use options::LoadOptions;
pub use selector::{select_artifact, ExportKind, SelectedArtifact};
pub use settings::LoaderSettings;
pub use strategy::{detect_class, select_strategy, ClassDetector};

// 重新导出错误类型
pub use autoload_common::{LoaderError, LoaderResult};
