//! 脚本化会话演示
//!
//! 用预设回答跑完一次完整问卷，并把报告同时以文本和 JSON 输出。

use oncology_intake::{
    ClinicalReport, IntakePipeline, ReportFormat, ScriptedConsole, SessionOutcome, SessionSettings,
};
use tracing::info;

const ANSWERS: &[&str] = &[
    // 登记
    "Jane Doe", "45", "female", "70.0", "1.75", "Y",
    // 红旗筛查
    "N", "N", "N", "N", "N", "N", "N",
    // 就诊原因
    "1",
    // 病理
    "1", "Y", "2", "Y",
    // 治疗方案
    "1", "Y", "1", "Y", "4", "Y", "1", "Y", "Y",
    // 副作用
    "3", "Y", "1", "Y", "2", "Y", "2", "Y",
    // 症状评分
    "2", "1", "5", "9", "0", "0",
    // 临床背景
    "1", "Y", "I am worried about nausea", "Y", "2", "Y",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let mut console = ScriptedConsole::new(ANSWERS.iter().copied());
    let mut pipeline = IntakePipeline::new(&mut console, SessionSettings::default());

    let report: ClinicalReport = match pipeline.run().await? {
        SessionOutcome::Completed(report) => report,
        SessionOutcome::EmergencyExit { flag } => {
            anyhow::bail!("unexpected emergency exit: {}", flag)
        }
    };
    drop(pipeline);

    for line in console.transcript() {
        println!("{}", line);
    }

    info!("以 JSON 格式重新渲染报告");
    println!("{}", report.render(ReportFormat::Json)?);
    Ok(())
}
