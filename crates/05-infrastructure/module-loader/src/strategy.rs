//! 注册策略选择

use di_abstractions::{Artifact, RegistrationStrategy};
use std::sync::Arc;

/// 判断制品是否具备类构造语义的谓词
pub type ClassDetector = Arc<dyn Fn(&Artifact) -> bool + Send + Sync>;

/// 默认检测：读取制品声明的构造形态
pub fn detect_class(artifact: &Artifact) -> bool {
    artifact.is_class()
}

/// 选择注册策略
///
/// 显式策略对整个调用的每个条目无条件生效；否则逐条目检测
pub fn select_strategy(
    artifact: &Artifact,
    explicit: Option<RegistrationStrategy>,
    detector: Option<&ClassDetector>,
) -> RegistrationStrategy {
    if let Some(strategy) = explicit {
        return strategy;
    }

    let is_class = match detector {
        Some(detector) => detector(artifact),
        None => detect_class(artifact),
    };
    if is_class {
        RegistrationStrategy::Class
    } else {
        RegistrationStrategy::Function
    }
}
