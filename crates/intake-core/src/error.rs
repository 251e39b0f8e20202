//! 错误定义模块

use thiserror::Error;

/// 字段级验证失败
///
/// 这类错误总是可恢复的：步骤执行器打印该步骤固定的提示语后重新提问，
/// 不会中断会话。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("输入为空")]
    Empty,

    #[error("只允许字母和空格")]
    NotAlphabetic,

    #[error("不是有效的整数: {0}")]
    NotAnInteger(String),

    #[error("数值 {value} 超出范围 [{lo}, {hi}]")]
    OutOfRange { value: i64, lo: i64, hi: i64 },

    #[error("不是有效的数字: {0}")]
    NotANumber(String),

    #[error("数值必须大于0: {0}")]
    NotPositive(f64),

    #[error("选项不存在，有效范围 1-{max}")]
    UnknownOption { max: usize },

    #[error("只接受 Y 或 N")]
    NotYesNo,

    #[error("无法识别的性别: {0}")]
    UnknownSex(String),

    #[error("内容过短，至少需要 {min} 个字符")]
    TooShort { min: usize },
}

/// 入院问卷系统统一错误类型
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("验证错误: {0}")]
    Validation(#[from] ValidationError),

    #[error("红旗症状阳性，会话终止: {flag}")]
    SafetyTermination { flag: String },

    #[error("输入流已关闭")]
    InputClosed,

    #[error("步骤 {step} 重试次数超过上限 ({attempts})")]
    RetryLimitExceeded { step: String, attempts: u32 },

    #[error("患者记录不完整，缺少字段: {0}")]
    IncompleteRecord(&'static str),

    #[error("无效状态转换: 从 {from} 到 {event}")]
    InvalidStateTransition { from: String, event: String },

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 入院问卷系统统一结果类型
pub type Result<T> = std::result::Result<T, IntakeError>;
