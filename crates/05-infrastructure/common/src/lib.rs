//! # Autoload Common
//!
//! 模块自动注册体系的公共类型。
//!
//! ## 核心内容
//!
//! - [`LoaderError`] - 模块加载与注册过程中的错误
//! - [`DependencyError`] - 容器注册与解析错误
//! - [`ConfigError`] - 加载器配置错误
//! - [`Lifetime`] - 组件生命周期
//!
//! ## 设计原则
//!
//! - 约定优于配置
//! - 失败即中止，不做部分注册
//! - 错误类型可被调用方按种类匹配

pub mod errors;
pub mod lifecycle;

pub use errors::*;
pub use lifecycle::*;
