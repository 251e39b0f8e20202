//! 控制台边界
//!
//! 问卷只依赖按行提问/输出的抽象接口。读取输入是会话中唯一的挂起点。

use async_trait::async_trait;
use intake_core::{IntakeError, Result};
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// 按行交互的控制台
#[async_trait]
pub trait Console: Send {
    /// 显示提问并读取一行回答；输入流结束时返回 `IntakeError::InputClosed`
    async fn prompt(&mut self, text: &str) -> Result<String>;

    /// 输出一行文本
    fn write(&mut self, text: &str);
}

/// 标准输入输出控制台
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn prompt(&mut self, text: &str) -> Result<String> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{} ", text)?;
            stdout.flush()?;
        }

        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(IntakeError::InputClosed),
        }
    }

    fn write(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// 脚本化控制台：按顺序返回预设回答，并记录全部输出
///
/// 用于测试和演示。预设回答耗尽后视为输入流关闭。
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// 尚未消费的回答数
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// 全部输出（提问和普通输出），按时间顺序
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// 输出中包含某段文本的行数
    pub fn count(&self, needle: &str) -> usize {
        self.transcript.iter().filter(|line| line.contains(needle)).count()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn prompt(&mut self, text: &str) -> Result<String> {
        self.transcript.push(text.to_string());
        self.answers.pop_front().ok_or(IntakeError::InputClosed)
    }

    fn write(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}
