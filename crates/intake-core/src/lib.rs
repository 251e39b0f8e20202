//! # Intake Core
//!
//! 入院问卷系统的核心模块，提供患者记录、错误定义和通用工具。

pub mod error;
pub mod models;
pub mod utils;

pub use error::{IntakeError, Result, ValidationError};
pub use models::*;
