//! 制品选择
//!
//! 从已加载的模块中挑出唯一需要注册的导出

use crate::module::{Export, ModuleValue, ResolverMarker};
use crate::naming::extract_base_name;
use autoload_common::LoaderError;
use di_abstractions::Artifact;

/// 被选中导出的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// 默认导出，名称取自文件名
    Default,
    /// 带标记的具名导出，名称取自导出键
    Named,
}

/// 选择结果
#[derive(Debug, Clone)]
pub struct SelectedArtifact {
    pub kind: ExportKind,
    /// 格式化之前的名称
    pub name: String,
    pub artifact: Artifact,
    pub marker: Option<ResolverMarker>,
}

/// 选择模块中需要注册的制品
///
/// 可调用的默认导出优先；否则按枚举顺序取第一个带解析器标记的具名导出。
/// 未标记的具名导出视为辅助导出，不会被注册。
pub fn select_artifact(path: &str, module: &ModuleValue) -> Result<SelectedArtifact, LoaderError> {
    if let Some(export) = module.default_export() {
        if let Some(artifact) = export.artifact() {
            return Ok(SelectedArtifact {
                kind: ExportKind::Default,
                name: extract_base_name(path).to_string(),
                artifact: artifact.clone(),
                marker: export.marker().cloned(),
            });
        }
    }

    module
        .named_exports()
        .find_map(|(key, export)| match export {
            Export::Tagged(provider) => Some(SelectedArtifact {
                kind: ExportKind::Named,
                name: key.to_string(),
                artifact: provider.artifact.clone(),
                marker: Some(provider.marker.clone()),
            }),
            _ => None,
        })
        .ok_or_else(|| LoaderError::resolution(path))
}
