//! 查询生成阶段 - 从用户主题产出固定数量的搜索查询

use crate::generator::context::GeneratorContext;
use crate::generator::outcome::StageOutcome;
use crate::generator::state::{PipelineState, QueryGenerationUpdate};

/// 目标查询数量
pub const QUERY_COUNT: usize = 5;

/// 查询生成器
#[derive(Default)]
pub struct QueryGenerator;

impl QueryGenerator {
    /// 执行查询生成。任何生成或解析失败都退化为空查询列表，
    /// 调用方通过轨迹条目区分"生成失败"与"合法的零查询"。
    pub async fn execute(
        &self,
        context: &GeneratorContext,
        state: &PipelineState,
    ) -> StageOutcome<QueryGenerationUpdate> {
        let topic = &state.user_topic;
        println!("🧭 为主题生成搜索查询: {}", topic);

        context
            .notify_progress(&format!(
                "Analyzing topic '{}' to generate optimal search queries...",
                topic
            ))
            .await;

        let system_prompt = include_str!("prompts/query_generation_sys.tpl");
        let user_prompt = self.build_user_prompt(state);

        match context
            .llm
            .extract_query_plan(system_prompt, &user_prompt)
            .await
        {
            Ok(plan) => {
                let search_queries = plan.queries;
                println!("✓ 生成了 {} 条搜索查询", search_queries.len());
                if search_queries.len() != QUERY_COUNT {
                    eprintln!(
                        "⚠️ 警告: 期望 {} 条搜索查询，实际得到 {} 条",
                        QUERY_COUNT,
                        search_queries.len()
                    );
                }

                context
                    .notify_progress(&format!(
                        "Generated {} search queries for topic '{}'",
                        search_queries.len(),
                        topic
                    ))
                    .await;

                let step = format!(
                    "Generated {} search queries for topic: {}",
                    search_queries.len(),
                    topic
                );
                StageOutcome::Success(QueryGenerationUpdate {
                    search_queries,
                    steps: vec![step],
                })
            }
            Err(e) => {
                eprintln!("❌ 搜索查询生成失败: {}", e);
                StageOutcome::degraded(
                    QueryGenerationUpdate {
                        search_queries: Vec::new(),
                        steps: vec![format!("Error generating search queries: {}", e)],
                    },
                    e.to_string(),
                )
            }
        }
    }

    /// 构建用户提示词：主题与语言指令（内容语言与查询语言可以不同）
    fn build_user_prompt(&self, state: &PipelineState) -> String {
        format!(
            "## TOPIC\n\
             {}\n\n\
             ## LANGUAGE INSTRUCTIONS\n\
             - Write all analysis and rationales in {}.\n\
             - {}\n",
            state.user_topic,
            state.language.display_name(),
            state.search_language.search_instruction()
        )
    }
}
