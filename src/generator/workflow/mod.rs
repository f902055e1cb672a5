use anyhow::Result;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::outcome::StageOutcome;
use crate::generator::queries::QueryGenerator;
use crate::generator::search::SearchOrchestrator;
use crate::generator::state::{PipelinePhase, PipelineState};
use crate::generator::synthesize::PathSynthesizer;
use crate::types::learning_path::LearningPath;

/// 启动学习路径生成工作流
pub async fn launch(config: &Config) -> Result<LearningPath> {
    let context = GeneratorContext::new(config.clone())?;

    // 启动时检查模型连接；预检失败只告警，管线照常以退化方式推进
    if let Err(e) = context.llm.check_connection().await {
        eprintln!("⚠️ 模型连通性预检失败，继续执行: {}", e);
    }

    let learning_path = run_pipeline(&context).await;

    crate::generator::outlet::save(&context.config.output_path, &learning_path).await?;

    Ok(learning_path)
}

/// 执行三阶段管线。每个阶段都是其输入上的全函数，
/// 返回结构良好（可能为空/退化）的更新，管线始终到达 Done。
pub async fn run_pipeline(context: &GeneratorContext) -> LearningPath {
    let mut state = PipelineState::from_config(&context.config);

    println!("🚀 开始生成学习路径: {}", state.user_topic);

    // 查询生成
    state.advance();
    debug_assert_eq!(state.phase, PipelinePhase::GeneratingQueries);
    let outcome = QueryGenerator.execute(context, &state).await;
    log_degradation("查询生成", &outcome);
    state.apply_query_generation(outcome.into_value());

    // 批量搜索
    state.advance();
    debug_assert_eq!(state.phase, PipelinePhase::SearchingWeb);
    let outcome = SearchOrchestrator.execute(context, &state).await;
    log_degradation("搜索编排", &outcome);
    state.apply_web_search(outcome.into_value());

    // 路径合成
    state.advance();
    debug_assert_eq!(state.phase, PipelinePhase::SynthesizingPath);
    let outcome = PathSynthesizer.execute(context, &state).await;
    log_degradation("路径合成", &outcome);
    state.apply_path_synthesis(outcome.into_value());

    state.advance();
    debug_assert_eq!(state.phase, PipelinePhase::Done);

    println!("\n📋 执行轨迹:");
    for (i, step) in state.steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }

    state
        .final_learning_path
        .unwrap_or_else(|| LearningPath::empty(context.config.topic.clone()))
}

/// 记录阶段退化原因（退化不中断管线）
fn log_degradation<T>(stage: &str, outcome: &StageOutcome<T>) {
    if let Some(cause) = outcome.cause() {
        eprintln!("⚠️ {} 阶段以退化结果继续: {}", stage, cause);
    }
}
