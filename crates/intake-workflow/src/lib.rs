//! # 问卷工作流模块
//!
//! 提供肿瘤科入院问卷的完整流程，包括：
//! - 字段验证器：把一行原始输入解析为强类型值
//! - 步骤执行器：提问、验证、手动描述和二次确认的状态机
//! - 安全筛查：红旗症状阳性时立即终止会话
//! - 问卷流水线：按固定阶段顺序填充患者记录并生成临床摘要
//! - 会话调度：按当日容量重复接待

pub mod catalog;
pub mod console;
pub mod phases;
pub mod pipeline;
pub mod report;
pub mod safety;
pub mod scheduler;
pub mod state_machine;
pub mod step;
pub mod validators;

// 重新导出主要类型
pub use catalog::OptionTable;
pub use console::{Console, ScriptedConsole, StdConsole};
pub use pipeline::{IntakePhase, IntakePipeline, SessionOutcome, SessionSettings};
pub use report::{ClinicalReport, ReportFormat, SeverityEntry};
pub use scheduler::{SchedulerOutcome, SessionScheduler};
pub use state_machine::{StepEvent, StepPhase, StepStateMachine};
pub use step::{Step, StepRunner};
