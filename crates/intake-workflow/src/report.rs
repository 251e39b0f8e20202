//! 临床摘要报告
//!
//! 报告是已完成患者记录的纯投影：不做验证，不产生副作用，可重复生成。

use chrono::{DateTime, Utc};
use intake_core::utils::round_one_decimal;
use intake_core::{require, IntakeError, PatientRecord, Result, SYMPTOM_ALERT_THRESHOLD};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 报告输出格式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// 单项症状评分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityEntry {
    pub symptom: String,
    pub score: u8,
    pub alert: bool,
}

/// SOAP 风格的临床摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalReport {
    pub clinic: String,
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub visit_reason: String,
    pub patient_name: String,
    pub sex: String,
    pub age: u32,
    pub height_m: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub functional_status: String,
    pub concern: String,
    pub recent_tests: String,
    pub diagnosis: String,
    pub stage: String,
    pub treatment: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub current_issue: String,
    pub issue_area: String,
    pub severity_grade: String,
    pub duration: String,
    pub severity_scores: Vec<SeverityEntry>,
}

const HEAVY_RULE: &str = "════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────";

impl ClinicalReport {
    /// 从患者记录生成报告；任何字段未写入都返回 `IncompleteRecord`
    pub fn from_record(record: &PatientRecord, clinic: &str) -> Result<Self> {
        if !record.symptom_scores.is_complete() {
            return Err(IntakeError::IncompleteRecord("symptom_scores"));
        }
        let bmi = record.bmi().ok_or(IntakeError::IncompleteRecord("bmi"))?;

        let severity_scores = record
            .symptom_scores
            .iter()
            .map(|(symptom, score)| SeverityEntry {
                symptom: symptom.label().to_string(),
                score,
                alert: score >= SYMPTOM_ALERT_THRESHOLD,
            })
            .collect();

        Ok(Self {
            clinic: clinic.to_string(),
            session_id: record.session_id,
            started_at: record.started_at,
            visit_reason: require(&record.visit_reason, "visit_reason")?.to_string(),
            patient_name: require(&record.name, "name")?.clone(),
            sex: require(&record.sex, "sex")?.to_string(),
            age: *require(&record.age, "age")?,
            height_m: *require(&record.height_m, "height_m")?,
            weight_kg: *require(&record.weight_kg, "weight_kg")?,
            bmi: round_one_decimal(bmi),
            functional_status: require(&record.functional_status, "functional_status")?.to_string(),
            concern: require(&record.concern, "concern")?.to_string(),
            recent_tests: require(&record.recent_tests, "recent_tests")?.to_string(),
            diagnosis: require(&record.pathology_category, "pathology_category")?.to_string(),
            stage: require(&record.stage, "stage")?.to_string(),
            treatment: require(&record.treatment_category, "treatment_category")?.to_string(),
            medication: require(&record.medication, "medication")?.to_string(),
            dosage: require(&record.dosage, "dosage")?.to_string(),
            frequency: require(&record.frequency, "frequency")?.to_string(),
            current_issue: require(&record.specific_symptom, "specific_symptom")?.to_string(),
            issue_area: require(&record.body_area, "body_area")?.to_string(),
            severity_grade: require(&record.severity_grade, "severity_grade")?.to_string(),
            duration: require(&record.duration, "duration")?.to_string(),
            severity_scores,
        })
    }

    /// 按指定格式渲染
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// 固定版式的文本报告
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            HEAVY_RULE.to_string(),
            "                 OFFICIAL CLINICAL SUMMARY".to_string(),
            HEAVY_RULE.to_string(),
            format!(
                "{} | Session {} | {}",
                self.clinic,
                self.session_id,
                self.started_at.format("%Y-%m-%d %H:%M UTC")
            ),
            format!("REASON FOR VISIT:  [ {} ]", self.visit_reason),
            LIGHT_RULE.to_string(),
            format!("PATIENT: {} ({})", self.patient_name.to_uppercase(), self.sex),
            format!(
                "METRICS: {}y | {:.2}m | {:.1}kg | BMI: {:.1}",
                self.age, self.height_m, self.weight_kg, self.bmi
            ),
            LIGHT_RULE.to_string(),
            "FUNCTIONAL & CLINICAL CONTEXT:".to_string(),
            format!("• Mobility Status: {}", self.functional_status),
            format!("• Background:      {}", self.concern),
            format!("• Recent Tests:    {}", self.recent_tests),
            LIGHT_RULE.to_string(),
            format!("DIAGNOSIS: {} ({})", self.diagnosis, self.stage),
            format!("TREATMENT:       {}", self.treatment),
            format!("CURRENT REGIMEN: {} ({})", self.medication, self.dosage),
            format!("FREQUENCY:       {}", self.frequency),
            LIGHT_RULE.to_string(),
            format!("CURRENT ISSUE: {} ({})", self.current_issue, self.issue_area),
            format!("SEVERITY:      {}", self.severity_grade),
            format!("DURATION:      {}", self.duration),
            String::new(),
            "REPORTED SEVERITY (0-10):".to_string(),
        ];

        for entry in &self.severity_scores {
            let marker = if entry.alert { "⚠️" } else { "•" };
            lines.push(format!("  {} {}: {}", marker, entry.symptom, entry.score));
        }

        lines.push(HEAVY_RULE.to_string());
        lines.push("REPORT COMPLETE - FORWARDED TO CLINICAL DASHBOARD".to_string());
        lines.push(HEAVY_RULE.to_string());
        lines.join("\n")
    }
}
