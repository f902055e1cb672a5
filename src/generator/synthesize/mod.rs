//! 路径合成阶段 - 把聚合的搜索结果合成为结构化学习路径

use crate::generator::context::GeneratorContext;
use crate::generator::outcome::StageOutcome;
use crate::generator::state::{PathSynthesisUpdate, PipelineState};
use crate::i18n::TargetLanguage;
use crate::types::learning_path::{LearningPath, Module};
use crate::types::search::SearchResult;
use crate::utils::text::escape_curly_braces;

/// 每条搜索保留的最佳摘录数，按原始顺序截取以约束提示词体积
pub const EXCERPTS_PER_SEARCH: usize = 3;

/// 提炼后的单条搜索素材
#[derive(Debug, Clone)]
pub struct ProcessedResult {
    pub query: String,
    pub relevant_information: String,
}

/// 路径合成器
#[derive(Default)]
pub struct PathSynthesizer;

impl PathSynthesizer {
    /// 执行路径合成。无搜索结果时立即返回空模块路径，不发起模型调用；
    /// 合成失败同样退化为空模块路径（保留主题），从不向上传播。
    pub async fn execute(
        &self,
        context: &GeneratorContext,
        state: &PipelineState,
    ) -> StageOutcome<PathSynthesisUpdate> {
        let topic = &state.user_topic;

        if state.search_results.is_empty() {
            println!("ℹ️ 没有可用的搜索结果");
            return StageOutcome::Success(PathSynthesisUpdate {
                modules: Vec::new(),
                final_learning_path: LearningPath::empty(topic.clone()),
                steps: vec!["No search results available".to_string()],
            });
        }

        context
            .notify_progress(&format!(
                "Creating initial learning path structure for '{}'...",
                topic
            ))
            .await;

        let processed = Self::process_search_results(&state.search_results);
        let system_prompt = include_str!("prompts/path_synthesis_sys.tpl");
        let user_prompt = Self::build_user_prompt(
            topic,
            &processed,
            state.desired_module_count,
            &state.language,
        );

        match context
            .llm
            .extract_module_plan(system_prompt, &user_prompt)
            .await
        {
            Ok(plan) => {
                let modules = Self::enforce_module_count(plan.modules, state.desired_module_count);
                let final_learning_path = LearningPath::new(topic.clone(), modules.clone());

                println!("✓ 创建了包含 {} 个模块的学习路径", modules.len());

                context
                    .notify_progress(&format!(
                        "Created initial learning path with {} modules",
                        modules.len()
                    ))
                    .await;

                let step = format!("Created learning path with {} modules", modules.len());
                StageOutcome::Success(PathSynthesisUpdate {
                    modules,
                    final_learning_path,
                    steps: vec![step],
                })
            }
            Err(e) => {
                eprintln!("❌ 学习路径合成失败: {}", e);
                StageOutcome::degraded(
                    PathSynthesisUpdate {
                        modules: Vec::new(),
                        final_learning_path: LearningPath::empty(topic.clone()),
                        steps: vec![format!("Error creating learning path: {}", e)],
                    },
                    e.to_string(),
                )
            }
        }
    }

    /// 提炼搜索素材：转义自由文本中的花括号，每条搜索截取前若干条摘录，
    /// 没有留存条目的结果整条跳过
    pub fn process_search_results(results: &[SearchResult]) -> Vec<ProcessedResult> {
        let mut processed = Vec::new();

        for result in results {
            let query = escape_curly_braces(&result.query);

            if result.results.is_empty() {
                eprintln!("⚠️ 警告: 查询 '{}' 没有可用的结果条目，跳过", query);
                continue;
            }

            let relevant_info: Vec<String> = result
                .results
                .iter()
                .take(EXCERPTS_PER_SEARCH)
                .map(|item| {
                    let source = escape_curly_braces(&item.source);
                    let content = escape_curly_braces(&item.content);
                    format!("Source: {}\n{}", source, content)
                })
                .collect();

            processed.push(ProcessedResult {
                query,
                relevant_information: relevant_info.join("\n\n"),
            });
        }

        processed
    }

    /// 组装合成提示词：转义后的主题、各查询的摘录块、模块数量指令与输出语言指令
    pub fn build_user_prompt(
        topic: &str,
        processed: &[ProcessedResult],
        desired_module_count: Option<usize>,
        language: &TargetLanguage,
    ) -> String {
        let mut results_text = String::new();
        for (i, result) in processed.iter().enumerate() {
            results_text.push_str(&format!(
                "\nSearch {}: \"{}\"\n{}\n---\n",
                i + 1,
                result.query,
                result.relevant_information
            ));
        }

        let module_count_instruction = match desired_module_count {
            Some(count) => format!(
                "IMPORTANT: Create EXACTLY {} modules for this learning path. Not more, not less.",
                count
            ),
            None => "Create a structured learning path with 3 to 7 modules.".to_string(),
        };

        format!(
            "Create a comprehensive learning path for the topic: {}.\n\n\
             Based on the following search results, organize the learning into logical modules:\n\
             {}\n\
             {}\n{}\n",
            escape_curly_braces(topic),
            results_text,
            module_count_instruction,
            language.content_instruction()
        )
    }

    /// 模块数量后处理：超出期望值时截断到恰好N个（保留前N个），
    /// 不足时接受缺口只记录告警，不做补齐也不重试
    pub fn enforce_module_count(mut modules: Vec<Module>, desired: Option<usize>) -> Vec<Module> {
        if let Some(count) = desired
            && modules.len() != count
        {
            eprintln!(
                "⚠️ 警告: 请求 {} 个模块，实际得到 {} 个",
                count,
                modules.len()
            );
            if modules.len() > count {
                modules.truncate(count);
                println!("   已截断到请求的 {} 个模块", count);
            }
        }
        modules
    }
}

// Include tests
#[cfg(test)]
mod tests;
