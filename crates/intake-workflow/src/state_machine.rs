//! 问卷步骤状态机
//!
//! 管理单个问题从提问到被接受的状态转换

use intake_core::{IntakeError, Result};
use std::collections::HashMap;

/// 步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepPhase {
    Prompting,       // 提问中
    Validating,      // 验证中
    DescribingOther, // 手动描述"其他"
    Confirming,      // 等待确认
    Accepted,        // 已接受
}

/// 步骤状态转换事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepEvent {
    InputReceived,
    ValidationFailed,
    ValidationPassed,
    OtherSelected,
    DescriptionReceived,
    Confirmed,
    Declined,
}

/// 步骤状态机
#[derive(Debug)]
pub struct StepStateMachine {
    transitions: HashMap<(StepPhase, StepEvent), StepPhase>,
}

impl StepStateMachine {
    /// 创建新的状态机实例
    pub fn new() -> Self {
        let mut transitions = HashMap::new();

        // 定义状态转换规则
        transitions.insert((StepPhase::Prompting, StepEvent::InputReceived), StepPhase::Validating);
        transitions.insert((StepPhase::Validating, StepEvent::ValidationFailed), StepPhase::Prompting);
        transitions.insert((StepPhase::Validating, StepEvent::ValidationPassed), StepPhase::Confirming);
        transitions.insert((StepPhase::Validating, StepEvent::OtherSelected), StepPhase::DescribingOther);
        // 功能状态一类的步骤先确认选项，再进入手动描述
        transitions.insert((StepPhase::Confirming, StepEvent::OtherSelected), StepPhase::DescribingOther);
        transitions.insert((StepPhase::DescribingOther, StepEvent::DescriptionReceived), StepPhase::Confirming);
        transitions.insert((StepPhase::Confirming, StepEvent::Confirmed), StepPhase::Accepted);
        transitions.insert((StepPhase::Confirming, StepEvent::Declined), StepPhase::Prompting);

        Self { transitions }
    }

    /// 执行状态转换
    pub fn transition(&self, from: &StepPhase, event: &StepEvent) -> Result<StepPhase> {
        match self.transitions.get(&(*from, *event)) {
            Some(to) => Ok(*to),
            None => Err(IntakeError::InvalidStateTransition {
                from: format!("{:?}", from),
                event: format!("{:?}", event),
            }),
        }
    }
}

impl Default for StepStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
