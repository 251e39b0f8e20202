//! 安全筛查与症状预警
//!
//! 红旗症状任何一项为阳性都会立即终止会话；症状评分过高只产生提醒，
//! 流程继续。

use intake_core::{
    AdvisoryAlert, IntakeError, PatientRecord, Result, Symptom, SYMPTOM_ALERT_THRESHOLD,
};
use tracing::{info, warn};

use crate::catalog::RED_FLAGS;
use crate::console::Console;
use crate::step::{Step, StepRunner};
use crate::validators;

const RED_FLAG_ERROR: &str =
    "⛔️ ENTRY ERROR: To ensure your safety and direct your data correctly, please use 'Y' or 'N' only.";

/// 红旗症状筛查
///
/// 按固定顺序逐项询问。任何一项回答 "Y" 返回
/// `IntakeError::SafetyTermination`，调用方通过 `?` 直接退出整个流水线。
pub async fn red_flag_screen<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    runner.say("--- CRITICAL SAFETY CHECK ---");
    runner.say("Please confirm if you are experiencing any of the following emergency symptoms.");

    for (index, flag) in RED_FLAGS.iter().enumerate() {
        let question = format!(
            "{}. Are you currently experiencing {}? Please enter 'Y' for Yes or 'N' for No:",
            index + 1,
            flag
        );
        let step = Step::new("red_flag", question, RED_FLAG_ERROR);

        if runner.capture(&step, validators::yes_no).await? {
            warn!("会话 {} 红旗症状阳性: {}", record.session_id, flag);
            runner.say("-- ⚠️ EMERGENCY PROTOCOL ACTIVATED --");
            runner.say(format!(
                "Dear {}, your report of {} has been directed to your doctor's emergency dashboard. \
                 Please stop this assessment and proceed to the nearest ER immediately.",
                record.display_name(),
                flag
            ));
            runner.say("Information directed to your doctor. Please STOP and go to the ER now....");
            return Err(IntakeError::SafetyTermination {
                flag: flag.to_string(),
            });
        }

        runner.say(format!("✅ Negative for {}. Continuing safety check...", flag));
    }

    record.safety_cleared = true;
    info!("会话 {} 红旗筛查全部阴性", record.session_id);
    Ok(())
}

/// 评分达到阈值时生成提醒
pub fn assess_score(symptom: Symptom, score: u8) -> Option<AdvisoryAlert> {
    if score >= SYMPTOM_ALERT_THRESHOLD {
        Some(AdvisoryAlert { symptom, score })
    } else {
        None
    }
}
