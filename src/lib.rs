//! # Oncology Intake
//!
//! 肿瘤科患者入院问卷系统的统一入口，重新导出各子模块。

pub use intake_admin;
pub use intake_core;
pub use intake_workflow;

pub use intake_admin::{ConfigManager, IntakeConfig};
pub use intake_core::{IntakeError, PatientRecord, Result, ValidationError};
pub use intake_workflow::{
    ClinicalReport, Console, IntakePipeline, ReportFormat, ScriptedConsole, SessionOutcome,
    SessionScheduler, SessionSettings, StdConsole,
};
