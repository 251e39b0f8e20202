//! 核心数据模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::error::{IntakeError, Result};
use crate::utils::compute_bmi;

/// 症状评分触发预警的阈值 (0-10 量表)
pub const SYMPTOM_ALERT_THRESHOLD: u8 = 8;

/// 患者选择"无顾虑"时写入报告的标准化文本
pub const NO_CONCERNS_TEXT: &str = "Patient reports no specific concerns at this time.";

/// 性别枚举
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
            Sex::Other => write!(f, "other"),
        }
    }
}

/// 就诊原因
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitReason {
    NewDiagnosis,
    FollowUp,
    Treatment,
    SideEffects,
    ResultsReview,
}

impl VisitReason {
    pub const ALL: [VisitReason; 5] = [
        VisitReason::NewDiagnosis,
        VisitReason::FollowUp,
        VisitReason::Treatment,
        VisitReason::SideEffects,
        VisitReason::ResultsReview,
    ];

    /// 按菜单编号 (从1开始) 查找
    pub fn from_code(code: usize) -> Option<Self> {
        code.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisitReason::NewDiagnosis => "New Diagnosis",
            VisitReason::FollowUp => "Follow-up",
            VisitReason::Treatment => "Treatment sessions",
            VisitReason::SideEffects => "Side Effects",
            VisitReason::ResultsReview => "Results Review",
        }
    }
}

impl fmt::Display for VisitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 临床分期
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    I,
    II,
    III,
    IV,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::I, Stage::II, Stage::III, Stage::IV];

    pub fn from_code(code: usize) -> Option<Self> {
        code.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::I => "Stage I",
            Stage::II => "Stage II",
            Stage::III => "Stage III",
            Stage::IV => "Stage IV",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 症状评估中固定的六项症状，声明顺序即评估顺序
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symptom {
    Pain,
    Fever,
    Fatigue,
    NauseaVomiting,
    ShortnessOfBreath,
    Bleeding,
}

impl Symptom {
    pub const ALL: [Symptom; 6] = [
        Symptom::Pain,
        Symptom::Fever,
        Symptom::Fatigue,
        Symptom::NauseaVomiting,
        Symptom::ShortnessOfBreath,
        Symptom::Bleeding,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Pain => "Pain",
            Symptom::Fever => "Fever",
            Symptom::Fatigue => "Fatigue",
            Symptom::NauseaVomiting => "Nausea/Vomiting",
            Symptom::ShortnessOfBreath => "Shortness of breath",
            Symptom::Bleeding => "Bleeding",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 症状评分表 (0-10)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SymptomScores {
    scores: BTreeMap<Symptom, u8>,
}

impl SymptomScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, symptom: Symptom, score: u8) {
        self.scores.insert(symptom, score);
    }

    pub fn get(&self, symptom: Symptom) -> Option<u8> {
        self.scores.get(&symptom).copied()
    }

    /// 六项症状是否全部评分
    pub fn is_complete(&self) -> bool {
        Symptom::ALL.iter().all(|s| self.scores.contains_key(s))
    }

    /// 按固定顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Symptom, u8)> + '_ {
        self.scores.iter().map(|(s, v)| (*s, *v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// 需要提醒医生的高分症状 (不终止会话)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryAlert {
    pub symptom: Symptom,
    pub score: u8,
}

/// 菜单选择结果：列表中的选项，或者选择"其他"后手动描述的文本
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Selection {
    Listed { code: usize, label: String },
    Described(String),
}

impl Selection {
    pub fn text(&self) -> &str {
        match self {
            Selection::Listed { label, .. } => label,
            Selection::Described(text) => text,
        }
    }

    pub fn code(&self) -> Option<usize> {
        match self {
            Selection::Listed { code, .. } => Some(*code),
            Selection::Described(_) => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// 患者主诉顾虑
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Concern {
    Narrative(String),
    NoConcerns,
}

impl Concern {
    pub fn text(&self) -> &str {
        match self {
            Concern::Narrative(text) => text,
            Concern::NoConcerns => NO_CONCERNS_TEXT,
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// 单次入院会话的患者记录
///
/// 所有字段在对应阶段运行前均为 `None`；流水线的阶段顺序保证报告生成时
/// 每个字段都已写入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,

    // 身份信息
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,

    // 体征
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,

    // 红旗筛查全部为阴性
    pub safety_cleared: bool,

    pub visit_reason: Option<VisitReason>,

    // 病理
    pub pathology_category: Option<Selection>,
    pub stage: Option<Stage>,

    // 治疗方案
    pub treatment_category: Option<Selection>,
    pub medication: Option<Selection>,
    pub dosage: Option<Selection>,
    pub frequency: Option<Selection>,

    // 副作用详情
    pub body_area: Option<Selection>,
    pub specific_symptom: Option<Selection>,
    pub severity_grade: Option<Selection>,
    pub duration: Option<Selection>,

    pub symptom_scores: SymptomScores,
    pub advisories: Vec<AdvisoryAlert>,

    // 临床背景
    pub recent_tests: Option<Selection>,
    pub concern: Option<Concern>,
    pub functional_status: Option<Selection>,
}

impl PatientRecord {
    /// 创建新的空白记录
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            name: None,
            age: None,
            sex: None,
            weight_kg: None,
            height_m: None,
            safety_cleared: false,
            visit_reason: None,
            pathology_category: None,
            stage: None,
            treatment_category: None,
            medication: None,
            dosage: None,
            frequency: None,
            body_area: None,
            specific_symptom: None,
            severity_grade: None,
            duration: None,
            symptom_scores: SymptomScores::new(),
            advisories: Vec::new(),
            recent_tests: None,
            concern: None,
            functional_status: None,
        }
    }

    /// BMI 始终由当前体重和身高推导，不单独存储
    pub fn bmi(&self) -> Option<f64> {
        compute_bmi(self.weight_kg?, self.height_m?)
    }

    /// 患者称呼，注册完成前为空字符串
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// 读取必填字段，未写入时报告字段名
pub fn require<'a, T>(field: &'a Option<T>, name: &'static str) -> Result<&'a T> {
    field.as_ref().ok_or(IntakeError::IncompleteRecord(name))
}
