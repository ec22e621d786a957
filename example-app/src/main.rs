//! # 示例应用程序
//!
//! 演示如何将模块映射自动注册到依赖注入容器

mod services;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use di_abstractions::ModuleContainerExt;
use di_impl::DiContainerImpl;
use module_loader::{ModuleLoader, SupplyMode};
use services::{Mailer, UserRepository};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "模块自动注册示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 模块供给方式，覆盖配置文件
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Deferred,
    Eager,
}

impl From<ModeArg> for SupplyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Deferred => SupplyMode::Deferred,
            ModeArg::Eager => SupplyMode::Eager,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动模块自动注册示例应用");

    let mut loader = match &args.config {
        Some(path) => ModuleLoader::from_config_file(path)
            .with_context(|| format!("读取配置文件失败: {path}"))?,
        None => ModuleLoader::from_default_config()
            .context("加载默认配置失败")?,
    };
    if let Some(mode) = args.mode {
        loader = loader.with_mode(mode.into());
    }
    info!("供给方式: {:?}, 选项: {:?}", loader.mode(), loader.options());

    let modules = match loader.mode() {
        SupplyMode::Deferred => services::lazy_modules(),
        SupplyMode::Eager => services::loaded_modules(),
    };

    let container = DiContainerImpl::new();
    if let Err(e) = loader.load(&container, modules).await {
        error!("模块注册失败 [{}]: {}", e.kind(), e);
        return Err(e.into());
    }

    info!("已注册组件: {:?}", container.registered_names());

    let repository = container.resolve_as::<UserRepository>("userRepository")?;
    info!("解析 userRepository 成功: {}", repository.describe());

    let mailer = container.resolve_as::<Mailer>("mailer")?;
    info!("解析 mailer 成功: {}", mailer.sender);

    info!("应用已退出");
    Ok(())
}
