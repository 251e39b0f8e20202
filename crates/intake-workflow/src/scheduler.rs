//! 会话调度
//!
//! 按当日容量重复运行问卷流水线，每个会话使用新的患者记录。

use intake_core::{IntakeError, Result};
use tracing::{info, warn};

use crate::console::Console;
use crate::pipeline::{IntakePipeline, SessionOutcome, SessionSettings};

const CAPACITY_RULE: &str = "════════════════════════════════════════════════════════════";

/// 调度结束的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerOutcome {
    /// 当日容量已满
    CapacityReached,
    /// 红旗症状终止，不再接待后续会话
    EmergencyExit { flag: String },
    /// 输入流在会话之间或会话中结束
    InputClosed,
}

/// 会话调度器
#[derive(Debug)]
pub struct SessionScheduler {
    capacity: u32,
    completed: u32,
    settings: SessionSettings,
}

impl SessionScheduler {
    pub fn new(capacity: u32, settings: SessionSettings) -> Self {
        Self {
            capacity,
            completed: 0,
            settings,
        }
    }

    /// 已完成（生成报告）的会话数
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// 持续接待直到容量已满、出现红旗终止或输入结束
    ///
    /// 重试超限只结束当前会话，不计入容量。
    pub async fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<SchedulerOutcome> {
        info!("调度器启动，当日容量 {}", self.capacity);

        while self.completed < self.capacity {
            let result = {
                let mut pipeline = IntakePipeline::new(&mut *console, self.settings.clone());
                pipeline.run().await
            };

            match result {
                Ok(SessionOutcome::Completed(report)) => {
                    self.completed += 1;
                    info!(
                        "会话 {} 已完成 ({}/{})",
                        report.session_id, self.completed, self.capacity
                    );
                }
                Ok(SessionOutcome::EmergencyExit { flag }) => {
                    warn!("红旗症状终止，调度器停止: {}", flag);
                    return Ok(SchedulerOutcome::EmergencyExit { flag });
                }
                Err(IntakeError::InputClosed) => {
                    info!("输入结束，已完成 {} 个会话", self.completed);
                    return Ok(SchedulerOutcome::InputClosed);
                }
                Err(IntakeError::RetryLimitExceeded { step, attempts }) => {
                    warn!("步骤 {} 重试 {} 次后放弃，会话结束", step, attempts);
                    console.write(
                        "⛔️ Too many invalid entries. This session has ended; please ask the front desk for help.",
                    );
                }
                Err(err) => return Err(err),
            }
        }

        self.turn_away(console).await
    }

    /// 容量已满时的提示
    async fn turn_away<C: Console + ?Sized>(&self, console: &mut C) -> Result<SchedulerOutcome> {
        info!("当日容量 {} 已满", self.capacity);
        console.write(CAPACITY_RULE);
        console.write("DAILY CAPACITY REACHED");
        console.write(CAPACITY_RULE);

        match console.prompt("Please enter your name:").await {
            Ok(name) => {
                console.write(&format!(
                    "Hey {}, unfortunately our {} daily capacity was reached. Please return tomorrow at 8:00 AM.",
                    name.trim(),
                    self.capacity
                ));
                Ok(SchedulerOutcome::CapacityReached)
            }
            Err(IntakeError::InputClosed) => Ok(SchedulerOutcome::CapacityReached),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::pipeline::tests::jane_doe_answers;

    #[tokio::test]
    async fn test_capacity_reached_after_completed_sessions() {
        let mut answers = jane_doe_answers();
        answers.extend(jane_doe_answers());
        answers.push("John Smith");
        let mut console = ScriptedConsole::new(answers);
        let mut scheduler = SessionScheduler::new(2, SessionSettings::default());

        let outcome = scheduler.run(&mut console).await.unwrap();
        assert_eq!(outcome, SchedulerOutcome::CapacityReached);
        assert_eq!(scheduler.completed(), 2);
        assert_eq!(console.count("OFFICIAL CLINICAL SUMMARY"), 2);
        assert!(console.output().contains(
            "Hey John Smith, unfortunately our 2 daily capacity was reached. Please return tomorrow at 8:00 AM."
        ));
    }

    #[tokio::test]
    async fn test_settings_flow_into_every_report() {
        let settings = SessionSettings {
            clinic_name: "Riverside Cancer Center".to_string(),
            ..SessionSettings::default()
        };
        let mut answers = jane_doe_answers();
        answers.push("Late Visitor");
        let mut console = ScriptedConsole::new(answers);
        let mut scheduler = SessionScheduler::new(1, settings);

        let outcome = scheduler.run(&mut console).await.unwrap();
        assert_eq!(outcome, SchedulerOutcome::CapacityReached);
        assert!(console.output().contains("Riverside Cancer Center | Session"));
        assert!(console.output().contains("Hey Late Visitor"));
    }

    #[tokio::test]
    async fn test_emergency_stops_scheduler() {
        let mut answers = jane_doe_answers();
        answers.extend(["Jane Roe", "50", "F", "60", "1.60", "Y", "N", "Y"]);
        answers.extend(jane_doe_answers());
        let mut console = ScriptedConsole::new(answers);
        let mut scheduler = SessionScheduler::new(10, SessionSettings::default());

        let outcome = scheduler.run(&mut console).await.unwrap();
        assert!(matches!(outcome, SchedulerOutcome::EmergencyExit { .. }));
        assert_eq!(scheduler.completed(), 1);
        assert!(console.remaining() > 0);
    }

    #[tokio::test]
    async fn test_input_closed_between_sessions() {
        let mut console = ScriptedConsole::new(jane_doe_answers());
        let mut scheduler = SessionScheduler::new(5, SessionSettings::default());

        let outcome = scheduler.run(&mut console).await.unwrap();
        assert_eq!(outcome, SchedulerOutcome::InputClosed);
        assert_eq!(scheduler.completed(), 1);
        assert_eq!(console.count("DAILY CAPACITY REACHED"), 0);
    }

    #[tokio::test]
    async fn test_retry_limit_ends_only_current_session() {
        let settings = SessionSettings {
            max_attempts: Some(2),
            ..SessionSettings::default()
        };
        let mut answers = vec!["123", "456"];
        answers.extend(jane_doe_answers());
        answers.push("Visitor");
        let mut console = ScriptedConsole::new(answers);
        let mut scheduler = SessionScheduler::new(1, settings);

        let outcome = scheduler.run(&mut console).await.unwrap();
        assert_eq!(outcome, SchedulerOutcome::CapacityReached);
        assert_eq!(scheduler.completed(), 1);
        assert_eq!(console.count("Too many invalid entries"), 1);
    }
}
