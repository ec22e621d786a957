//! 命名约定
//!
//! 从模块路径提取基础名称，并将其格式化为注册名称

use std::sync::Arc;

/// 自定义名称格式化函数
pub type NameFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// 从路径提取基础名称
///
/// 反斜杠视为路径分隔符，取最后一段文件名中第一个 `.` 之前的部分，
/// 例如 `./dir/fooBar.index.js` 得到 `fooBar`。
pub fn extract_base_name(path: &str) -> &str {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file_name.split('.').next().unwrap_or(file_name)
}

/// 默认格式化：仅将首字符转为小写
///
/// 不做分词，也不改变其余字符的大小写
pub fn default_format_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 格式化注册名称，提供自定义格式化函数时完全替代默认行为
pub fn format_name(name: &str, formatter: Option<&NameFormatter>) -> String {
    match formatter {
        Some(formatter) => formatter(name),
        None => default_format_name(name),
    }
}
