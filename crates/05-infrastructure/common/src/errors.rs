//! 错误类型定义

use thiserror::Error;

/// 装箱的错误对象
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },
}

/// 依赖注入错误类型
///
/// 由容器产生，加载器原样向上传递
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {name}")]
    ComponentNotRegistered { name: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("依赖解析失败: {type_name}, 原因: {message}")]
    DependencyResolutionFailed { type_name: String, message: String },

    #[error("组件实例类型不匹配: {name}, 期望 {expected}")]
    TypeMismatch { name: String, expected: String },

    #[error("组件注册失败: {name}, 原因: {message}")]
    RegistrationError { name: String, message: String },
}

impl DependencyError {
    /// 创建注册失败错误
    pub fn registration(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistrationError {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// 模块加载错误类型
///
/// 任一错误都会中止整个加载调用
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("无法从路径 \"{path}\" 解析模块名称和导出")]
    Resolution { path: String },

    #[error("路径 \"{path}\" 解析出的注册名称为空")]
    EmptyName { path: String },

    #[error("同步加载模式下发现延迟加载的模块: {}. {hint}", .paths.join(", "))]
    EagerModeViolation { paths: Vec<String>, hint: String },

    #[error("模块加载失败: {path}, 原因: {source}")]
    ModuleLoad { path: String, source: BoxError },

    #[error(transparent)]
    Container(#[from] DependencyError),

    #[error("加载器配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 同步加载模式违规时给出的修复提示
pub const EAGER_MODE_HINT: &str =
    "请改为传入已加载的模块 (ModuleSource::Loaded)，或改用异步入口 load_modules";

impl LoaderError {
    /// 创建解析错误
    pub fn resolution(path: impl Into<String>) -> Self {
        Self::Resolution { path: path.into() }
    }

    /// 创建同步模式违规错误
    pub fn eager_mode_violation(paths: Vec<String>) -> Self {
        Self::EagerModeViolation {
            paths,
            hint: EAGER_MODE_HINT.to_string(),
        }
    }

    /// 稳定的错误种类名称，供调用方按种类匹配
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Resolution { .. } | Self::EmptyName { .. } => "ResolutionError",
            Self::EagerModeViolation { .. } => "EagerModeViolationError",
            Self::ModuleLoad { .. } => "ModuleLoadError",
            Self::Container(_) => "ContainerError",
            Self::Config(_) => "ConfigError",
        }
    }

    /// 出错的模块路径（如果有）
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Resolution { path }
            | Self::EmptyName { path }
            | Self::ModuleLoad { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type LoaderResult<T> = Result<T, LoaderError>;
