//! 入院问卷命令行程序

use anyhow::Result;
use clap::Parser;
use intake_admin::ConfigManager;
use intake_workflow::{SchedulerOutcome, SessionScheduler, StdConsole};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// 入院问卷命令行参数
#[derive(Parser, Debug)]
#[command(name = "intake-cli")]
#[command(about = "肿瘤科患者入院问卷")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别，覆盖配置文件
    #[arg(short, long)]
    log_level: Option<String>,

    /// 每日接待上限，覆盖配置文件
    #[arg(long)]
    capacity: Option<u32>,

    /// 单个步骤允许的无效输入次数
    #[arg(long)]
    max_attempts: Option<u32>,

    /// 打印生效配置后退出
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut manager = ConfigManager::load(args.config.as_deref())?;
    let mut config = manager.config().clone();
    if let Some(capacity) = args.capacity {
        config.clinic.daily_capacity = capacity;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.session.max_attempts = Some(max_attempts);
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    manager.update_config(config)?;

    if args.print_config {
        print!("{}", manager.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = manager.config();

    // 日志写到 stderr，不与问卷输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .with_writer(std::io::stderr)
        .init();

    info!("启动入院问卷: {}", config.clinic.name);
    if let Some(path) = manager.config_path() {
        info!("  配置文件: {}", path);
    }
    info!("  每日容量: {}", config.clinic.daily_capacity);

    let mut console = StdConsole::new();
    let mut scheduler = SessionScheduler::new(config.clinic.daily_capacity, config.session_settings());

    let outcome = match scheduler.run(&mut console).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("问卷运行失败: {}", e);
            return Err(e.into());
        }
    };

    match outcome {
        SchedulerOutcome::EmergencyExit { flag } => {
            warn!("红旗症状终止: {}", flag);
            Ok(ExitCode::from(config.exit.emergency_code))
        }
        SchedulerOutcome::CapacityReached | SchedulerOutcome::InputClosed => {
            info!("已完成 {} 个会话", scheduler.completed());
            Ok(ExitCode::SUCCESS)
        }
    }
}
