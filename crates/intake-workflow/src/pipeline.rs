//! 问卷流水线
//!
//! 按固定顺序执行各阶段，整个会话只持有一份患者记录。红旗症状阳性时
//! 跳过剩余阶段且不生成报告。

use intake_core::{IntakeError, PatientRecord, Result};
use std::fmt;
use tracing::{info, warn};

use crate::console::Console;
use crate::phases;
use crate::report::{ClinicalReport, ReportFormat};
use crate::safety;
use crate::step::StepRunner;

/// 流水线阶段，声明顺序即执行顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakePhase {
    Registration,
    SafetyCheck,
    ConsultationRouting,
    Pathology,
    Regimen,
    SideEffects,
    SymptomAssessment,
    ClinicalContext,
    Summary,
}

impl IntakePhase {
    pub const ALL: [IntakePhase; 9] = [
        IntakePhase::Registration,
        IntakePhase::SafetyCheck,
        IntakePhase::ConsultationRouting,
        IntakePhase::Pathology,
        IntakePhase::Regimen,
        IntakePhase::SideEffects,
        IntakePhase::SymptomAssessment,
        IntakePhase::ClinicalContext,
        IntakePhase::Summary,
    ];

    /// 下一个阶段；`Summary` 之后没有阶段
    pub fn next(self) -> Option<IntakePhase> {
        let index = Self::ALL.iter().position(|phase| *phase == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for IntakePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntakePhase::Registration => "registration",
            IntakePhase::SafetyCheck => "safety check",
            IntakePhase::ConsultationRouting => "consultation routing",
            IntakePhase::Pathology => "pathology",
            IntakePhase::Regimen => "regimen",
            IntakePhase::SideEffects => "side effects",
            IntakePhase::SymptomAssessment => "symptom assessment",
            IntakePhase::ClinicalContext => "clinical context",
            IntakePhase::Summary => "summary",
        };
        f.write_str(name)
    }
}

/// 单次会话的运行参数
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub clinic_name: String,
    pub max_attempts: Option<u32>,
    pub report_format: ReportFormat,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            clinic_name: "Oncology Clinic".to_string(),
            max_attempts: None,
            report_format: ReportFormat::Text,
        }
    }
}

/// 会话结果
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// 全部阶段完成，报告已输出
    Completed(ClinicalReport),
    /// 红旗症状阳性，会话终止
    EmergencyExit { flag: String },
}

/// 问卷流水线
pub struct IntakePipeline<'c, C: Console + ?Sized> {
    console: &'c mut C,
    settings: SessionSettings,
    record: PatientRecord,
}

impl<'c, C: Console + ?Sized> IntakePipeline<'c, C> {
    /// 每条流水线对应一个新会话和一份新记录
    pub fn new(console: &'c mut C, settings: SessionSettings) -> Self {
        Self {
            console,
            settings,
            record: PatientRecord::new(),
        }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn into_record(self) -> PatientRecord {
        self.record
    }

    /// 运行整个会话
    ///
    /// `SafetyTermination` 转换为 `SessionOutcome::EmergencyExit`；
    /// 其他错误（输入结束、重试超限）原样返回。
    pub async fn run(&mut self) -> Result<SessionOutcome> {
        let mut runner = StepRunner::new(&mut *self.console, self.settings.max_attempts);
        let record = &mut self.record;
        info!("会话 {} 开始", record.session_id);

        let mut phase = IntakePhase::Registration;
        while phase != IntakePhase::Summary {
            info!("会话 {} 进入阶段: {}", record.session_id, phase);

            match run_phase(phase, &mut runner, record).await {
                Ok(()) => {}
                Err(IntakeError::SafetyTermination { flag }) => {
                    warn!("会话 {} 因红旗症状终止，不生成报告", record.session_id);
                    return Ok(SessionOutcome::EmergencyExit { flag });
                }
                Err(err) => return Err(err),
            }

            phase = phase.next().unwrap_or(IntakePhase::Summary);
        }

        info!("会话 {} 进入阶段: {}", record.session_id, phase);
        let report = ClinicalReport::from_record(record, &self.settings.clinic_name)?;
        runner.say(report.render(self.settings.report_format)?);
        info!(
            "会话 {} 完成，症状预警 {} 项",
            record.session_id,
            record.advisories.len()
        );
        Ok(SessionOutcome::Completed(report))
    }
}

async fn run_phase<C: Console + ?Sized>(
    phase: IntakePhase,
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    match phase {
        IntakePhase::Registration => phases::registration(runner, record).await,
        IntakePhase::SafetyCheck => safety::red_flag_screen(runner, record).await,
        IntakePhase::ConsultationRouting => phases::consultation_routing(runner, record).await,
        IntakePhase::Pathology => phases::pathology(runner, record).await,
        IntakePhase::Regimen => phases::regimen(runner, record).await,
        IntakePhase::SideEffects => phases::side_effects(runner, record).await,
        IntakePhase::SymptomAssessment => phases::symptom_assessment(runner, record).await,
        IntakePhase::ClinicalContext => phases::clinical_context(runner, record).await,
        IntakePhase::Summary => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    const REGISTRATION: [&str; 6] = ["Jane Doe", "45", "female", "70.0", "1.75", "Y"];

    /// 完整会话的全部回答
    pub(crate) fn jane_doe_answers() -> Vec<&'static str> {
        let mut answers = REGISTRATION.to_vec();
        answers.extend(["N"; 7]);
        answers.push("1");
        answers.extend(["1", "Y", "2", "Y"]);
        answers.extend(["1", "Y", "1", "Y", "4", "Y", "1", "Y", "Y"]);
        answers.extend(["3", "Y", "1", "Y", "2", "Y", "2", "Y"]);
        answers.extend(["2", "1", "5", "9", "0", "0"]);
        answers.extend(["1", "Y", "I am worried about nausea", "Y", "2", "Y"]);
        answers
    }

    #[test]
    fn test_phase_order() {
        assert_eq!(IntakePhase::Registration.next(), Some(IntakePhase::SafetyCheck));
        assert_eq!(IntakePhase::Regimen.next(), Some(IntakePhase::SideEffects));
        assert_eq!(IntakePhase::ClinicalContext.next(), Some(IntakePhase::Summary));
        assert_eq!(IntakePhase::Summary.next(), None);
    }

    #[tokio::test]
    async fn test_full_session_produces_report() {
        let mut console = ScriptedConsole::new(jane_doe_answers());
        let mut pipeline = IntakePipeline::new(&mut console, SessionSettings::default());

        let outcome = pipeline.run().await.unwrap();
        let report = match outcome {
            SessionOutcome::Completed(report) => report,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(report.bmi, 22.9);
        assert_eq!(pipeline.record().advisories.len(), 1);
        drop(pipeline);

        assert_eq!(console.remaining(), 0);
        let output = console.output();
        assert!(output.contains("OFFICIAL CLINICAL SUMMARY"));
        assert!(output.contains("(Stage II)"));
        assert!(output.contains("⚠️ Nausea/Vomiting: 9"));
        assert!(output.contains("  • Fatigue: 5"));
        assert!(output.contains("• Background:      I am worried about nausea"));
    }

    #[tokio::test]
    async fn test_red_flag_skips_remaining_phases() {
        for position in 0..7 {
            let mut answers = REGISTRATION.to_vec();
            answers.extend(vec!["N"; position]);
            answers.push("Y");
            let mut console = ScriptedConsole::new(answers);
            let mut pipeline = IntakePipeline::new(&mut console, SessionSettings::default());

            let outcome = pipeline.run().await.unwrap();
            assert!(matches!(outcome, SessionOutcome::EmergencyExit { .. }));
            assert!(pipeline.record().visit_reason.is_none());
            drop(pipeline);

            assert_eq!(console.count("Reason for Visit"), 0);
            assert_eq!(console.count("OFFICIAL CLINICAL SUMMARY"), 0);
        }
    }

    #[tokio::test]
    async fn test_declined_registration_must_be_redone_before_safety() {
        let mut answers = vec!["Jane Doe", "45", "F", "70", "1.75", "N"];
        answers.extend(jane_doe_answers());
        let mut console = ScriptedConsole::new(answers);
        let mut pipeline = IntakePipeline::new(&mut console, SessionSettings::default());

        let outcome = pipeline.run().await.unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        drop(pipeline);

        assert_eq!(console.count("Please provide your full legal name"), 2);
        assert_eq!(console.count("--- CRITICAL SAFETY CHECK ---"), 1);
    }

    #[tokio::test]
    async fn test_json_report_format() {
        let settings = SessionSettings {
            report_format: ReportFormat::Json,
            ..SessionSettings::default()
        };
        let mut console = ScriptedConsole::new(jane_doe_answers());
        let mut pipeline = IntakePipeline::new(&mut console, settings);

        pipeline.run().await.unwrap();
        drop(pipeline);
        assert!(console.output().contains("\"patient_name\": \"Jane Doe\""));
    }

    #[tokio::test]
    async fn test_closed_input_is_not_an_emergency() {
        let mut console = ScriptedConsole::new(REGISTRATION);
        let mut pipeline = IntakePipeline::new(&mut console, SessionSettings::default());

        let result = pipeline.run().await;
        assert!(matches!(result, Err(IntakeError::InputClosed)));
    }
}
