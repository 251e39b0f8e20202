//! 问卷各阶段
//!
//! 每个阶段是一个接收步骤执行器和患者记录的函数，按流水线规定的顺序调用。

use intake_core::utils::round_one_decimal;
use intake_core::{PatientRecord, Result, Stage, ValidationError, VisitReason};
use tracing::{info, warn};

use crate::catalog::{self, OptionTable};
use crate::console::Console;
use crate::safety;
use crate::step::{Step, StepRunner};
use crate::validators;

/// 年龄有效范围
pub const AGE_RANGE: (i64, i64) = (1, 130);

/// 患者顾虑的最少字符数
pub const CONCERN_MIN_LEN: usize = 5;

const NAME_ERROR: &str =
    "⛔️ Invalid entry. Please ensure you provide a full name using only alphabetic characters.";
const AGE_ERROR: &str = "⛔️ Data entry error. Please enter a valid numerical age (e.g., 45).";
const SEX_ERROR: &str = "⛔️ Selection not recognized. Please choose from M, F, or Other.";
const WEIGHT_ERROR: &str =
    "⛔️ Input error. Please enter weight as a positive number or decimal (e.g., 70.5).";
const HEIGHT_ERROR: &str =
    "⛔️ Entry failed. Height must be greater than 0 and entered in meters (e.g., 1.75).";

/// 阶段1：登记
///
/// 最终确认未通过时从姓名开始重新登记整个阶段，不限次数。
pub async fn registration<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    loop {
        let name = runner
            .capture(
                &Step::new(
                    "name",
                    "Welcome to our clinic. Please provide your full legal name as it appears on your ID:",
                    NAME_ERROR,
                ),
                validators::alphabetic_text,
            )
            .await?;
        record.name = Some(name);
        runner.say("✅ Name recorded successfully. Proceeding to demographic verification.");

        let age = runner
            .capture(
                &Step::new("age", "Please enter your current age in years using numbers:", AGE_ERROR),
                |raw| validators::integer_in_range(raw, AGE_RANGE.0, AGE_RANGE.1).map(|v| v as u32),
            )
            .await?;
        record.age = Some(age);
        runner.say("✅ Age verified. Eligibility criteria met for the next phase.");

        let sex = runner
            .capture(
                &Step::new("sex", "Please indicate your sex (M/F/Other):", SEX_ERROR),
                validators::sex,
            )
            .await?;
        record.sex = Some(sex);
        runner.say("✅ Patient sex documented. Initializing physical metrics module.");

        let weight = runner
            .capture(
                &Step::new(
                    "weight",
                    "Enter your current weight in kilograms (kg) for dosage precision:",
                    WEIGHT_ERROR,
                ),
                validators::positive_float,
            )
            .await?;
        record.weight_kg = Some(weight);
        runner.say("✅ Weight captured. Metric has been stored for clinical calculations.");

        let height = runner
            .capture(
                &Step::new(
                    "height",
                    "Enter your height in meters (m) to complete your physical profile:",
                    HEIGHT_ERROR,
                ),
                validators::positive_float,
            )
            .await?;
        record.height_m = Some(height);
        runner.say("✅ Height captured. Finalizing biometric analysis.");

        if let Some(bmi) = record.bmi() {
            runner.say(format!(
                "Based on the information provided, your BMI is: {:.1}",
                round_one_decimal(bmi)
            ));
        }

        let answer = runner
            .ask("Is all the information provided correct? (Yes/No):")
            .await?;
        if validators::is_yes_word(&answer) {
            runner.say("Registration Finalized ✅. Your profile has been successfully updated.");
            info!("会话 {} 登记完成", record.session_id);
            return Ok(());
        }

        runner.say(
            "Validation Declined ⛔️. Basic registration incomplete. Please restart the process.",
        );
        info!("会话 {} 登记未确认，重新开始登记", record.session_id);
    }
}

/// 阶段3：就诊分流，唯一不需要二次确认的菜单步骤
pub async fn consultation_routing<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    let step = Step::new(
        "visit_reason",
        "To route your file correctly, please select your visit reason number from the list above:",
        "⛔️ Invalid entry. Please enter a number (1-5) from the menu.",
    )
    .with_menu(&catalog::VISIT_REASONS);

    let reason = runner
        .capture(&step, |raw| {
            lookup(raw, &catalog::VISIT_REASONS, VisitReason::from_code)
        })
        .await?;
    record.visit_reason = Some(reason);
    runner.say(format!(
        "✅ Entry verified. Your file has been updated with the following status: {}",
        reason
    ));
    Ok(())
}

/// 阶段4：病理分类与分期，各自独立确认
pub async fn pathology<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    let error = "⛔️ Validation failed. To ensure data integrity, please re-verify your selection from the menu above.";

    let category_step = Step::new(
        "pathology_category",
        "Select the numeric code (1-7) corresponding to your primary diagnosis:",
        error,
    )
    .confirm()
    .describe_other(
        "You selected 'Other'. Please type the name of the pathology you are currently being treated for:",
    );
    let category = runner.select(&category_step, &catalog::PATHOLOGY_CATEGORIES).await?;
    runner.say(format!("✅ Pathology synchronized. Recording category: {}", category));
    record.pathology_category = Some(category);

    let stage_step = Step::new(
        "stage",
        "Please enter the number (1-4) representing your current clinical stage:",
        error,
    )
    .with_menu(&catalog::STAGES)
    .confirm();
    let stage = runner
        .capture(&stage_step, |raw| lookup(raw, &catalog::STAGES, Stage::from_code))
        .await?;
    runner.say(format!("✅ Staging confirmed. Recording: {}", stage));
    record.stage = Some(stage);

    if let Some(category) = &record.pathology_category {
        runner.say(format!(
            "Dear {}, your clinical profile was generated: {} - {}",
            record.display_name(),
            category,
            stage
        ));
    }
    runner.say("All diagnostic data has been successfully validated.");
    Ok(())
}

/// 阶段5：治疗方案
///
/// 四个步骤各自确认后再整体复核；复核被否定时四个步骤全部重做。
pub async fn regimen<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    loop {
        let treatment = runner
            .select(
                &Step::new(
                    "treatment_category",
                    "Please select your primary treatment category (1-7) from the list above:",
                    "⛔️ INVALID SELECTION: Please enter a number from the list provided (e.g., 1-7).",
                )
                .confirm()
                .describe_other("Please type your treatment name:"),
                &catalog::TREATMENTS,
            )
            .await?;
        runner.say(format!("✅ You have selected: {}. This has been added to your profile.", treatment));

        let medication = runner
            .select(
                &Step::new(
                    "medication",
                    format!(
                        "Based on your treatment ({}), please select your medication (1-7):",
                        treatment
                    ),
                    "⛔️ INVALID SELECTION: Please enter a number from the list provided (e.g., 1-7).",
                )
                .confirm()
                .describe_other("Please type your medication name:"),
                &catalog::MEDICATIONS,
            )
            .await?;
        runner.say(format!("✅ You have selected: {}. This has been added to your profile.", medication));

        let dosage = runner
            .select(
                &Step::new(
                    "dosage",
                    format!(
                        "Based on your medication ({}), please select the prescribed dosage (1-8):",
                        medication
                    ),
                    "⛔️ INVALID INPUT: Please enter a number between 1 and 8 to select your dosage.",
                )
                .confirm()
                .describe_other("You selected 'Other'. Please type your specific dosage (e.g., 75 mg/m²):"),
                &catalog::DOSAGES,
            )
            .await?;
        runner.say(format!("✅ Dosage Recorded: {} has been saved to your regimen.", dosage));

        let frequency = runner
            .select(
                &Step::new(
                    "frequency",
                    "Please select your medication schedule (1-8):",
                    "⛔️ SELECTION ERROR: Please choose a valid frequency number from 1 to 8.",
                )
                .confirm()
                .describe_other("You selected 'Other'. Please specify your medication schedule (e.g., Every 48 hours):"),
                &catalog::FREQUENCIES,
            )
            .await?;
        runner.say(format!("✅ Schedule Recorded: {}.", frequency));

        runner.say(format!("Dear {},", record.display_name()));
        runner.say("Here is the summary of the regimen details you just completed:");
        runner.say("-".repeat(40));
        runner.say(format!("• Treatment Category: {}", treatment));
        runner.say(format!("• Medication Name:    {}", medication));
        runner.say(format!("• Prescribed Dosage:  {}", dosage));
        runner.say(format!("• Intake Frequency:   {}", frequency));
        runner.say("-".repeat(40));

        let verified = runner
            .capture(
                &Step::new(
                    "regimen_review",
                    "Please take your time to verify if everything in this summary is correct. Reply 'Y' for Yes or 'N' for No:",
                    "⛔️ Invalid input. Please enter 'y' or 'n'.",
                ),
                validators::yes_no,
            )
            .await?;
        if verified {
            record.treatment_category = Some(treatment);
            record.medication = Some(medication);
            record.dosage = Some(dosage);
            record.frequency = Some(frequency);
            runner.say("✅ Thank you. Your information is verified. We can now continue to the next task.");
            return Ok(());
        }

        runner.say("⚠️ Profile Redirected: Please try again.");
        info!("会话 {} 治疗方案复核未通过，重新采集", record.session_id);
    }
}

/// 阶段6：副作用详情
pub async fn side_effects<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    let area = runner
        .select(
            &Step::new(
                "body_area",
                "To begin your report, please type the number (1-7) that corresponds to the body region you wish to report:",
                "⛔️ INPUT ERROR: That is not a valid selection. You must enter a single number from 1 to 7 to proceed.",
            )
            .confirm_with("Is the selected area correct? Please enter 'Y' for Yes or 'N' for No:")
            .describe_other("Please provide a specific description of the area or location:"),
            &catalog::BODY_AREAS,
        )
        .await?;
    runner.say(format!("✅ Area Recorded: We are now documenting symptoms for the {}", area));

    let symptoms = catalog::symptoms_for_area(&area);
    let symptom_error = format!(
        "⛔️ SELECTION ERROR: Please enter a number from 1 to {} to identify your specific symptom.",
        symptoms.len()
    );
    let symptom = runner
        .select(
            &Step::new(
                "specific_symptom",
                format!(
                    "Based on the area selected ({}), please select the specific symptom you are experiencing (1-{}):",
                    area,
                    symptoms.len()
                ),
                &symptom_error,
            )
            .confirm_with("Is the selected symptom correct? Please enter 'Y' for Yes or 'N' for No:")
            .describe_other("You selected 'Other'. Please type the name of the symptom you are experiencing in this area:"),
            symptoms,
        )
        .await?;
    runner.say(format!("✅ Symptom Logged: {}. We will now assess the severity.", symptom));

    let severity = runner
        .select(
            &Step::new(
                "severity_grade",
                format!(
                    "Based on your report of {}, please select the severity grade that best describes your current state (1-5):",
                    symptom
                ),
                "⛔️ INPUT ERROR: Please enter a number between 1 and 5 to accurately grade your symptom severity.",
            )
            .confirm_with("Is this severity rating correct? Enter 'Y' for Yes or 'N' for No:")
            .describe_other("Please provide any additional details regarding the intensity of this symptom:"),
            &catalog::SEVERITY_GRADES,
        )
        .await?;
    runner.say(format!("✅ Severity Recorded: This symptom is logged as {}.", severity));

    let duration = runner
        .select(
            &Step::new(
                "duration",
                format!(
                    "How long have you been experiencing {}? Please select a timeframe (1-6):",
                    symptom
                ),
                "⛔️ SELECTION ERROR: Please enter a valid number (1-6) to record the duration.",
            )
            .confirm_with("Is this timeframe correct? (Y/N):")
            .describe_other("You selected 'Other'. Please type the specific duration or pattern (e.g., 'Only after meals'):"),
            &catalog::DURATIONS,
        )
        .await?;
    runner.say(format!("✅ Duration Logged: This symptom has been present for {}", duration));

    runner.say(format!("Dear {}, your side-effect report is ready.", record.display_name()));
    runner.say(format!("Summary: {} affecting the {}.", symptom, area));
    runner.say(format!("Severity: {}", severity));
    runner.say(format!("Duration: {}", duration));

    record.body_area = Some(area);
    record.specific_symptom = Some(symptom);
    record.severity_grade = Some(severity);
    record.duration = Some(duration);
    Ok(())
}

/// 阶段7：六项症状评分 (0-10)，高分只提醒不终止
pub async fn symptom_assessment<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    let error = "⛔️ Entry not recognized. To ensure your doctor receives accurate data, please provide a number from 0 to 10.";

    for symptom in intake_core::Symptom::ALL {
        runner.say(format!("Assessing: {}", symptom));
        let question = format!(
            "How would you describe your {} today? Please enter a number from 0 (not present) to 10 (extremely severe):",
            symptom
        );
        let score = runner
            .capture(&Step::new("symptom_score", question, error), |raw| {
                validators::integer_in_range(raw, 0, 10).map(|v| v as u8)
            })
            .await?;
        record.symptom_scores.record(symptom, score);

        match safety::assess_score(symptom, score) {
            Some(alert) => {
                warn!(
                    "会话 {} 症状预警: {} 评分 {}",
                    record.session_id, alert.symptom, alert.score
                );
                runner.say(format!(
                    "⚠️ URGENT ALERT: Dear {}, a score of {} for {} has triggered an emergency notification. \
                     This information has been directed to your doctor immediately. Please seek urgent care.",
                    record.display_name(),
                    score,
                    symptom
                ));
                record.advisories.push(alert);
            }
            None => {
                runner.say(format!(
                    "✅ Information saved. Your report for {} of {} has been forwarded to your clinical record for review.",
                    symptom, score
                ));
            }
        }
    }

    runner.say("✅ Assessment complete. All symptom scores have been validated and stored.");
    Ok(())
}

/// 阶段8：临床背景
pub async fn clinical_context<C: Console + ?Sized>(
    runner: &mut StepRunner<'_, C>,
    record: &mut PatientRecord,
) -> Result<()> {
    let tests = runner
        .select(
            &Step::new(
                "recent_tests",
                format!(
                    "Dear {}, have you had any medical tests recently that might be related? Please choose a number between (1-6) from the list above:",
                    record.display_name()
                ),
                "⛔️ INPUT ERROR: Please select a valid category (1-6) to ensure your symptoms are properly documented.",
            )
            .confirm_with("Would you like to link this test to your current report? Please enter 'Y' for Yes or 'N' for No:")
            .describe_other("You selected 'Other'. Please type the name of the specific test or procedure performed:"),
            &catalog::RECENT_TESTS,
        )
        .await?;
    runner.say(format!(
        "✅ Linked: Your {} results have been flagged for review alongside your symptoms.",
        tests
    ));
    record.recent_tests = Some(tests);

    runner.say("--- Patient Advocacy: Personal Concerns ---");
    let concern = runner
        .capture(
            &Step::new(
                "concern",
                "What is your primary concern or question for the medical team? (Please write 1-2 sentences, or type 'N' for None):",
                "⛔️ INPUT TOO SHORT >> Try Again: Please provide a bit more detail (at least 5 characters), or type 'N' to skip.",
            )
            .confirm_with("Should we include this exact wording in the final report for your doctor? Please enter 'Y' for Yes or 'N' for No:"),
            |raw| validators::concern(raw, CONCERN_MIN_LEN),
        )
        .await?;
    runner.say("✅ Recorded: Your personal concern has been added to the physician's summary.");
    record.concern = Some(concern);

    let area = record
        .body_area
        .as_ref()
        .map(|area| area.text().to_string())
        .unwrap_or_default();
    runner.say(format!(
        "Dear {}, to assist with clinical triaging, we need to assess how your {} symptoms affect your daily routine.",
        record.display_name(),
        area
    ));
    let status = runner
        .select(
            &Step::new(
                "functional_status",
                "Which level best describes your current physical capability? Please choose a number (1-5):",
                "⛔️ SELECTION ERROR: Please select a valid level (1-5) to ensure the severity of your condition is correctly logged.",
            )
            .confirm_with("Is this accurate for your medical record? Please enter 'Y' for Yes or 'N' for No:")
            .describe_other("Please briefly describe how your symptoms are currently limiting your physical activities:")
            .confirm_description("Is the information provided correct? Please enter 'Y' for Yes or 'N' for No:"),
            &catalog::FUNCTIONAL_STATUS,
        )
        .await?;
    runner.say(format!(
        "✅ Assessment Complete: {} has been recorded as your current functional status.",
        status
    ));
    record.functional_status = Some(status);
    Ok(())
}

/// 菜单编号映射到强类型枚举
fn lookup<T>(
    raw: &str,
    table: &OptionTable,
    from_code: fn(usize) -> Option<T>,
) -> std::result::Result<T, ValidationError> {
    let code = validators::choice(raw, table)?;
    from_code(code).ok_or(ValidationError::UnknownOption { max: table.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use intake_core::{Concern, IntakeError, Selection, Sex, Symptom};

    #[tokio::test]
    async fn test_registration_computes_bmi() {
        let mut console = ScriptedConsole::new(["Jane Doe", "45", "female", "70.0", "1.75", "Y"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        registration(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.age, Some(45));
        assert_eq!(record.sex, Some(Sex::Female));
        assert!(console.output().contains("your BMI is: 22.9"));
    }

    #[tokio::test]
    async fn test_registration_restarts_when_not_confirmed() {
        let mut console = ScriptedConsole::new([
            "J4ne", "Jane Doe", "200", "45", "x", "F", "0", "70", "1.75", "N",
            "Jane Roe", "46", "M", "80", "1.80", "yes",
        ]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        registration(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.name.as_deref(), Some("Jane Roe"));
        assert_eq!(record.age, Some(46));
        assert_eq!(record.sex, Some(Sex::Male));
        assert_eq!(console.count("Validation Declined"), 1);
        assert_eq!(console.count(NAME_ERROR), 1);
        assert_eq!(console.count(AGE_ERROR), 1);
        assert_eq!(console.count(SEX_ERROR), 1);
        assert_eq!(console.count(WEIGHT_ERROR), 1);
    }

    #[tokio::test]
    async fn test_consultation_has_no_confirmation() {
        let mut console = ScriptedConsole::new(["6", "4"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        consultation_routing(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.visit_reason, Some(VisitReason::SideEffects));
        assert_eq!(console.count("Please enter a number (1-5)"), 1);
        assert_eq!(console.count("You entered:"), 0);
    }

    #[tokio::test]
    async fn test_pathology_records_category_and_stage() {
        let mut console = ScriptedConsole::new(["1", "Y", "2", "Y"]);
        let mut record = PatientRecord::new();
        record.name = Some("Jane Doe".to_string());
        let mut runner = StepRunner::new(&mut console, None);

        pathology(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.stage, Some(Stage::II));
        assert_eq!(record.pathology_category.as_ref().and_then(Selection::code), Some(1));
        assert!(console
            .output()
            .contains("Dear Jane Doe, your clinical profile was generated"));
    }

    #[tokio::test]
    async fn test_regimen_redo_after_declined_summary() {
        let mut console = ScriptedConsole::new([
            "1", "Y", "1", "Y", "4", "Y", "1", "Y", "maybe", "N",
            "2", "Y", "7", "Custom agent", "Y", "8", "75 mg/m²", "Y", "2", "Y", "Y",
        ]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        regimen(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.medication, Some(Selection::Described("Custom agent".to_string())));
        assert_eq!(record.dosage, Some(Selection::Described("75 mg/m²".to_string())));
        assert_eq!(record.frequency.as_ref().and_then(Selection::code), Some(2));
        assert_eq!(console.count("Profile Redirected"), 1);
        assert_eq!(console.count("Please enter 'y' or 'n'."), 1);
        assert_eq!(console.count("• Treatment Category:"), 2);
    }

    #[tokio::test]
    async fn test_declined_regimen_is_not_recorded() {
        let mut console = ScriptedConsole::new(["1", "Y", "1", "Y", "4", "Y", "1", "Y", "N"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        let result = regimen(&mut runner, &mut record).await;
        assert!(matches!(result, Err(IntakeError::InputClosed)));
        assert!(record.treatment_category.is_none());
        assert!(record.medication.is_none());
        assert!(record.dosage.is_none());
        assert!(record.frequency.is_none());
    }

    #[tokio::test]
    async fn test_regimen_review_rejects_yes_word() {
        let mut console = ScriptedConsole::new(["1", "Y", "1", "Y", "4", "Y", "1", "Y", "YES", "Y"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        regimen(&mut runner, &mut record).await.unwrap();
        assert_eq!(console.count("Please enter 'y' or 'n'."), 1);
        assert_eq!(record.dosage.as_ref().map(Selection::text), Some("50 mg"));
    }

    #[tokio::test]
    async fn test_side_effect_symptoms_follow_area() {
        let mut console = ScriptedConsole::new(["3", "Y", "1", "Y", "2", "Y", "2", "Y"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        side_effects(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.specific_symptom.as_ref().map(Selection::text), Some("Nausea"));
        assert_eq!(record.duration.as_ref().map(Selection::text), Some("1 to 3 days"));
        assert!(console.output().contains("--- Symptom Identification: Gastrointestinal ---"));
        assert!(console.output().contains("Summary: Nausea affecting the Gastrointestinal"));
    }

    #[tokio::test]
    async fn test_described_area_uses_general_symptoms() {
        let mut console = ScriptedConsole::new([
            "7", "Lower back", "Y", "7", "Sciatica", "Y", "3", "Y", "1", "Y",
        ]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        side_effects(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.body_area, Some(Selection::Described("Lower back".to_string())));
        assert_eq!(record.specific_symptom, Some(Selection::Described("Sciatica".to_string())));
        assert!(console.output().contains("--- Symptom Identification ---"));
    }

    #[tokio::test]
    async fn test_symptom_assessment_alerts_without_stopping() {
        let mut console = ScriptedConsole::new(["2", "11", "1", "5", "9", "0", "10"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        symptom_assessment(&mut runner, &mut record).await.unwrap();
        assert!(record.symptom_scores.is_complete());
        assert_eq!(record.symptom_scores.get(Symptom::Fever), Some(1));
        let alerted: Vec<Symptom> = record.advisories.iter().map(|a| a.symptom).collect();
        assert_eq!(alerted, vec![Symptom::NauseaVomiting, Symptom::Bleeding]);
        assert_eq!(console.count("URGENT ALERT"), 2);
        assert_eq!(console.count("Entry not recognized"), 1);
    }

    #[tokio::test]
    async fn test_clinical_context_sentinel_concern() {
        let mut console = ScriptedConsole::new(["1", "Y", "hi", "n", "Y", "2", "Y"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        clinical_context(&mut runner, &mut record).await.unwrap();
        assert_eq!(record.concern, Some(Concern::NoConcerns));
        assert_eq!(record.functional_status.as_ref().and_then(Selection::code), Some(2));
        assert_eq!(console.count("INPUT TOO SHORT"), 1);
    }

    #[tokio::test]
    async fn test_closed_input_propagates() {
        let mut console = ScriptedConsole::new(["Jane Doe"]);
        let mut record = PatientRecord::new();
        let mut runner = StepRunner::new(&mut console, None);

        let result = registration(&mut runner, &mut record).await;
        assert!(matches!(result, Err(IntakeError::InputClosed)));
    }
}
