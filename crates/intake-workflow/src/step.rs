//! 步骤执行器
//!
//! 驱动单个问题直到被接受：提问 → 验证 → (手动描述) → 确认。
//! 验证失败时打印该步骤固定的提示语并重新提问。

use intake_core::{IntakeError, Result, Selection, ValidationError};
use std::fmt::Display;
use tracing::{debug, trace, warn};

use crate::catalog::OptionTable;
use crate::console::Console;
use crate::state_machine::{StepEvent, StepPhase, StepStateMachine};
use crate::validators;

const DEFAULT_CONFIRMATION: &str =
    "Is the information provided correct? Please enter 'Y' for Yes or 'N' for No:";
const DEFAULT_OTHER_PROMPT: &str = "You selected 'Other'. Please describe it in your own words:";
const DESCRIPTION_ERROR: &str = "⛔️ A description is required. Please type a few words.";
const ENTRY_CLEARED: &str = "Entry cleared. Let's try again.";

/// 单个问题步骤
#[derive(Debug, Clone)]
pub struct Step<'a> {
    name: &'a str,
    question: String,
    error: &'a str,
    menu: Option<&'a OptionTable>,
    confirmation: Option<String>,
    other_prompt: Option<String>,
    other_confirmation: Option<String>,
}

impl<'a> Step<'a> {
    pub fn new(name: &'a str, question: impl Into<String>, error: &'a str) -> Self {
        Self {
            name,
            question: question.into(),
            error,
            menu: None,
            confirmation: None,
            other_prompt: None,
            other_confirmation: None,
        }
    }

    /// 每次提问前显示的选项表
    pub fn with_menu(mut self, menu: &'a OptionTable) -> Self {
        self.menu = Some(menu);
        self
    }

    /// 验证通过后追加 Y/N 确认
    pub fn confirm(mut self) -> Self {
        self.confirmation = Some(DEFAULT_CONFIRMATION.to_string());
        self
    }

    pub fn confirm_with(mut self, question: impl Into<String>) -> Self {
        self.confirmation = Some(question.into());
        self
    }

    /// 选择"其他"时的手动描述提示
    pub fn describe_other(mut self, prompt: impl Into<String>) -> Self {
        self.other_prompt = Some(prompt.into());
        self
    }

    /// 先确认"其他"选项，再手动描述并单独确认描述内容
    pub fn confirm_description(mut self, question: impl Into<String>) -> Self {
        self.other_confirmation = Some(question.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

/// 步骤执行器
pub struct StepRunner<'c, C: Console + ?Sized> {
    console: &'c mut C,
    machine: StepStateMachine,
    max_attempts: Option<u32>,
}

impl<'c, C: Console + ?Sized> StepRunner<'c, C> {
    /// `max_attempts` 为 `None` 时不限制重试次数
    pub fn new(console: &'c mut C, max_attempts: Option<u32>) -> Self {
        Self {
            console,
            machine: StepStateMachine::new(),
            max_attempts,
        }
    }

    /// 输出一行文本
    pub fn say(&mut self, text: impl AsRef<str>) {
        self.console.write(text.as_ref());
    }

    /// 直接提问，不做验证
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        self.console.prompt(question).await
    }

    /// 采集一个非菜单字段
    pub async fn capture<T, F>(&mut self, step: &Step<'_>, parse: F) -> Result<T>
    where
        T: Display,
        F: Fn(&str) -> std::result::Result<T, ValidationError>,
    {
        let mut phase = StepPhase::Prompting;
        let mut failures = 0u32;

        loop {
            if let Some(menu) = step.menu {
                self.console.write(&menu.render());
            }
            let raw = self.console.prompt(&step.question).await?;
            phase = self.advance(step, phase, StepEvent::InputReceived)?;

            let value = match parse(&raw) {
                Ok(value) => value,
                Err(err) => {
                    phase = self.reject(step, phase, &err, &mut failures)?;
                    continue;
                }
            };
            phase = self.advance(step, phase, StepEvent::ValidationPassed)?;

            if let Some(question) = &step.confirmation {
                if !self.review(question, &value).await? {
                    phase = self.advance(step, phase, StepEvent::Declined)?;
                    continue;
                }
            }

            self.advance(step, phase, StepEvent::Confirmed)?;
            return Ok(value);
        }
    }

    /// 采集一个菜单选择，带"其他"分支
    pub async fn select(&mut self, step: &Step<'_>, table: &OptionTable) -> Result<Selection> {
        let mut phase = StepPhase::Prompting;
        let mut failures = 0u32;

        loop {
            self.console.write(&table.render());
            let raw = self.console.prompt(&step.question).await?;
            phase = self.advance(step, phase, StepEvent::InputReceived)?;

            let code = match validators::choice(&raw, table) {
                Ok(code) => code,
                Err(err) => {
                    phase = self.reject(step, phase, &err, &mut failures)?;
                    continue;
                }
            };
            let label = table.label(code).unwrap_or_default();
            let mut value = Selection::Listed {
                code,
                label: label.to_string(),
            };

            let other = table.is_other(code);
            let describe_first = other && step.other_confirmation.is_none();

            if describe_first {
                phase = self.advance(step, phase, StepEvent::OtherSelected)?;
                value = Selection::Described(self.describe(step).await?);
                phase = self.advance(step, phase, StepEvent::DescriptionReceived)?;
            } else {
                phase = self.advance(step, phase, StepEvent::ValidationPassed)?;
            }

            if let Some(question) = &step.confirmation {
                if !self.review(question, &value).await? {
                    phase = self.advance(step, phase, StepEvent::Declined)?;
                    continue;
                }
            }

            if let (true, Some(question)) = (other, &step.other_confirmation) {
                phase = self.advance(step, phase, StepEvent::OtherSelected)?;
                value = Selection::Described(self.describe(step).await?);
                phase = self.advance(step, phase, StepEvent::DescriptionReceived)?;

                if !self.review(question, &value).await? {
                    phase = self.advance(step, phase, StepEvent::Declined)?;
                    continue;
                }
            }

            self.advance(step, phase, StepEvent::Confirmed)?;
            return Ok(value);
        }
    }

    /// 手动描述，非空即可
    async fn describe(&mut self, step: &Step<'_>) -> Result<String> {
        let prompt = step.other_prompt.as_deref().unwrap_or(DEFAULT_OTHER_PROMPT);
        loop {
            let raw = self.console.prompt(prompt).await?;
            match validators::free_text(&raw) {
                Ok(text) => return Ok(text),
                Err(err) => {
                    debug!("步骤 {} 手动描述无效: {}", step.name, err);
                    self.console.write(DESCRIPTION_ERROR);
                }
            }
        }
    }

    /// 确认候选值；只有肯定回答才算通过
    async fn review<T: Display>(&mut self, question: &str, value: &T) -> Result<bool> {
        self.console.write(&format!("You entered: {}", value));
        let answer = self.console.prompt(question).await?;
        let accepted = validators::is_affirmative(&answer);
        if !accepted {
            self.console.write(ENTRY_CLEARED);
        }
        Ok(accepted)
    }

    fn reject(
        &mut self,
        step: &Step<'_>,
        phase: StepPhase,
        err: &ValidationError,
        failures: &mut u32,
    ) -> Result<StepPhase> {
        *failures += 1;
        debug!("步骤 {} 输入无效 (第 {} 次): {}", step.name, failures, err);
        self.console.write(step.error);

        if let Some(limit) = self.max_attempts {
            if *failures >= limit {
                warn!("步骤 {} 达到重试上限 {}", step.name, limit);
                return Err(IntakeError::RetryLimitExceeded {
                    step: step.name.to_string(),
                    attempts: *failures,
                });
            }
        }

        self.advance(step, phase, StepEvent::ValidationFailed)
    }

    fn advance(&self, step: &Step<'_>, from: StepPhase, event: StepEvent) -> Result<StepPhase> {
        let to = self.machine.transition(&from, &event)?;
        trace!("步骤 {}: {:?} --{:?}--> {:?}", step.name, from, event, to);
        Ok(to)
    }
}
