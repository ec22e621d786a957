//! 示例服务模块
//!
//! 模拟构建工具产生的“路径 → 模块”映射

use autoload_common::Lifetime;
use di_abstractions::Artifact;
use module_loader::{Export, ModuleMap, ModuleValue, ResolverMarker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 配置服务
#[derive(Debug)]
pub struct ConfigService {
    pub app_name: String,
}

/// 用户仓储
#[derive(Debug)]
pub struct UserRepository {
    config: Arc<ConfigService>,
}

impl UserRepository {
    pub fn describe(&self) -> String {
        format!("UserRepository@{}", self.config.app_name)
    }
}

/// 邮件发送器
#[derive(Debug)]
pub struct Mailer {
    pub sender: String,
}

fn config_module() -> ModuleValue {
    ModuleValue::new().with_default(Export::tagged_with(
        Artifact::class(|_| {
            Ok(ConfigService {
                app_name: "example-app".to_string(),
            })
        }),
        ResolverMarker::new().with_lifetime(Lifetime::Singleton),
    ))
}

fn user_repository_module() -> ModuleValue {
    ModuleValue::new()
        .with_export("TABLE", Export::value(serde_json::json!("users")))
        .with_export(
            "UserRepository",
            Export::tagged(Artifact::class(|cradle| {
                Ok(UserRepository {
                    config: cradle.resolve_as::<ConfigService>("configService")?,
                })
            })),
        )
}

fn mailer_module() -> ModuleValue {
    let factory = Artifact::function(|_| {
        Ok(Mailer {
            sender: "noreply@example.com".to_string(),
        })
    });
    ModuleValue::new().with_default(Export::callable(factory))
}

/// 全部模块均已加载
pub fn loaded_modules() -> ModuleMap {
    ModuleMap::new()
        .with_module("./services/ConfigService.ts", config_module())
        .with_module("./repositories/user.repository.ts", user_repository_module())
        .with_module("./services/mailer.ts", mailer_module())
}

/// 模块按需加载，模拟网络延迟
pub fn lazy_modules() -> ModuleMap {
    ModuleMap::new()
        .with_lazy("./services/ConfigService.ts", || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(config_module())
        })
        .with_lazy("./repositories/user.repository.ts", || async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(user_repository_module())
        })
        .with_lazy("./services/mailer.ts", || async {
            info!("加载 mailer 模块");
            Ok(mailer_module())
        })
}
