//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义模块加载器与外部容器之间的接缝。
//!
//! ## 核心接口
//!
//! - [`ModuleContainer`] - 接收注册的容器接口
//! - [`Artifact`] - 可注册的构造器或工厂函数
//! - [`RegistrationDescriptor`] - 注册描述符
//! - [`Cradle`] - 制品实例化时的依赖视图

pub mod artifact;
pub mod container;
pub mod registry;
pub mod resolver;

pub use artifact::*;
pub use container::*;
pub use registry::*;
pub use resolver::*;
