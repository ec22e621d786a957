//! 可注册制品
//!
//! 制品是被注册到容器中的构造器或工厂函数

use crate::resolver::Cradle;
use autoload_common::DependencyError;
use std::any::Any;
use std::sync::Arc;

/// 容器交付的组件实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 制品工厂函数类型
pub type ArtifactFn =
    Arc<dyn Fn(&dyn Cradle) -> Result<Instance, DependencyError> + Send + Sync>;

/// 制品声明的构造形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactShape {
    /// 类形态，需要以构造方式实例化
    Class,
    /// 普通函数形态，直接调用
    Function,
}

/// 可注册制品
#[derive(Clone)]
pub struct Artifact {
    type_name: &'static str,
    shape: ArtifactShape,
    factory: ArtifactFn,
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("type_name", &self.type_name)
            .field("shape", &self.shape)
            .field("factory", &"<function>")
            .finish()
    }
}

impl Artifact {
    /// 以类形态包装构造器
    pub fn class<T, F>(constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Cradle) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self::with_shape::<T, F>(ArtifactShape::Class, constructor)
    }

    /// 以函数形态包装工厂函数
    pub fn function<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Cradle) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self::with_shape::<T, F>(ArtifactShape::Function, factory)
    }

    fn with_shape<T, F>(shape: ArtifactShape, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Cradle) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            shape,
            factory: Arc::new(move |cradle: &dyn Cradle| {
                factory(cradle).map(|value| Arc::new(value) as Instance)
            }),
        }
    }

    /// 产出实例的类型名称
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 声明的构造形态
    pub const fn shape(&self) -> ArtifactShape {
        self.shape
    }

    /// 是否具备类的构造语义
    pub fn is_class(&self) -> bool {
        self.shape == ArtifactShape::Class
    }

    /// 以构造方式实例化，两种形态均可
    pub fn construct(&self, cradle: &dyn Cradle) -> Result<Instance, DependencyError> {
        (self.factory)(cradle)
    }

    /// 以函数方式调用
    ///
    /// 类形态的制品不能在未构造的情况下被调用
    pub fn invoke(&self, cradle: &dyn Cradle) -> Result<Instance, DependencyError> {
        match self.shape {
            ArtifactShape::Function => (self.factory)(cradle),
            ArtifactShape::Class => Err(DependencyError::DependencyResolutionFailed {
                type_name: self.type_name.to_string(),
                message: "类构造器不能以函数方式调用".to_string(),
            }),
        }
    }
}
