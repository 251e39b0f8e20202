//! 配置管理
//!
//! 默认值 → 可选的 TOML 文件 → `INTAKE_` 前缀的环境变量，逐层覆盖。

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use intake_workflow::{ReportFormat, SessionSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// 环境变量前缀，例如 `INTAKE_CLINIC__DAILY_CAPACITY=50`
pub const ENV_PREFIX: &str = "INTAKE";

/// 问卷系统完整配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntakeConfig {
    /// 诊所配置
    pub clinic: ClinicConfig,
    /// 会话配置
    pub session: SessionConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 退出码配置
    pub exit: ExitConfig,
}

/// 诊所配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicConfig {
    /// 报告抬头中的诊所名称
    pub name: String,
    /// 每日接待上限
    pub daily_capacity: u32,
}

/// 会话配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// 单个步骤允许的无效输入次数，未设置时不限制
    pub max_attempts: Option<u32>,
    /// 报告格式
    pub report_format: ReportFormat,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或 `EnvFilter` 指令
    pub level: String,
}

/// 退出码配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExitConfig {
    /// 红旗症状终止时的进程退出码
    pub emergency_code: u8,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: "Oncology Clinic".to_string(),
            daily_capacity: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self { emergency_code: 2 }
    }
}

impl IntakeConfig {
    /// 转换为单次会话的运行参数
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            clinic_name: self.clinic.name.clone(),
            max_attempts: self.session.max_attempts,
            report_format: self.session.report_format,
        }
    }
}

/// 配置管理器
#[derive(Debug)]
pub struct ConfigManager {
    /// 配置数据
    config: IntakeConfig,
    /// 配置文件路径
    config_path: Option<String>,
    /// 配置验证器
    validator: ConfigValidator,
}

impl ConfigManager {
    /// 加载配置；`config_path` 为 `None` 时只使用默认值和环境变量
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().with_context(|| match config_path {
            Some(path) => format!("Failed to load configuration from: {}", path),
            None => "Failed to load configuration from environment".to_string(),
        })?;
        let config: IntakeConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        match config_path {
            Some(path) => info!("Configuration loaded successfully from: {}", path),
            None => info!("Configuration loaded from defaults and environment"),
        }
        Self::with_config(config, config_path.map(str::to_string))
    }

    /// 从 TOML 文本加载，不读取环境变量
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?;
        let config: IntakeConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        Self::with_config(config, None)
    }

    fn with_config(config: IntakeConfig, config_path: Option<String>) -> Result<Self> {
        let validator = ConfigValidator::new();
        validator.validate(&config)?;
        Ok(Self {
            config,
            config_path,
            validator,
        })
    }

    /// 获取配置
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    /// 更新配置，新配置未通过验证时保持原配置
    pub fn update_config(&mut self, new_config: IntakeConfig) -> Result<()> {
        self.validator.validate(&new_config)?;
        self.config = new_config;
        debug!("Configuration updated");
        Ok(())
    }

    /// 渲染当前生效的配置
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.config).context("Failed to serialize configuration")
    }
}

/// 配置验证器
#[derive(Debug)]
pub struct ConfigValidator {
    /// 验证规则
    validation_rules: Vec<ValidationRule>,
}

/// 验证规则
#[derive(Debug)]
struct ValidationRule {
    /// 字段路径
    field_path: &'static str,
    /// 验证函数
    validator: fn(&IntakeConfig) -> Result<()>,
    /// 错误消息
    error_message: &'static str,
}

impl ConfigValidator {
    /// 创建新的配置验证器
    pub fn new() -> Self {
        let validation_rules = vec![
            ValidationRule {
                field_path: "clinic.daily_capacity",
                validator: |config| {
                    if config.clinic.daily_capacity == 0 {
                        Err(anyhow::anyhow!("Daily capacity cannot be 0"))
                    } else {
                        Ok(())
                    }
                },
                error_message: "Invalid daily capacity",
            },
            ValidationRule {
                field_path: "session.max_attempts",
                validator: |config| match config.session.max_attempts {
                    Some(0) => Err(anyhow::anyhow!("Max attempts must be at least 1 when set")),
                    _ => Ok(()),
                },
                error_message: "Invalid retry limit",
            },
            ValidationRule {
                field_path: "exit.emergency_code",
                validator: |config| {
                    if config.exit.emergency_code == 0 {
                        Err(anyhow::anyhow!("Emergency exit code cannot be 0"))
                    } else {
                        Ok(())
                    }
                },
                error_message: "Invalid emergency exit code",
            },
        ];

        Self { validation_rules }
    }

    /// 验证配置
    pub fn validate(&self, config: &IntakeConfig) -> Result<()> {
        for rule in &self.validation_rules {
            if let Err(e) = (rule.validator)(config) {
                error!("Configuration validation failed for {}: {}", rule.field_path, e);
                return Err(anyhow::anyhow!("{}: {}", rule.error_message, e));
            }
        }

        debug!("Configuration validation passed");
        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
