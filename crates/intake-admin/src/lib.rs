//! # 问卷管理模块
//!
//! 提供配置加载、验证和导出等运维功能

pub mod config;

pub use config::{
    ClinicConfig, ConfigManager, ConfigValidator, ExitConfig, IntakeConfig, LoggingConfig,
    SessionConfig,
};
