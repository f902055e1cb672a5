use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;

use crate::generator::context::GeneratorContext;
use crate::generator::outcome::StageOutcome;
use crate::generator::search::execute_single_search;
use crate::generator::state::{PipelineState, WebSearchUpdate};
use crate::types::search::{SearchQuery, SearchResult};

/// 批量搜索编排器。将查询列表切分为有界批次，批内并发、批间串行，
/// 聚合结果与输入查询按下标对齐。
#[derive(Default)]
pub struct SearchOrchestrator;

impl SearchOrchestrator {
    pub async fn execute(
        &self,
        context: &GeneratorContext,
        state: &PipelineState,
    ) -> StageOutcome<WebSearchUpdate> {
        if state.search_queries.is_empty() {
            println!("ℹ️ 没有待执行的搜索查询");
            return StageOutcome::Success(WebSearchUpdate {
                search_results: Vec::new(),
                steps: vec!["No search queries to execute".to_string()],
            });
        }

        let queries = &state.search_queries;
        // 有效批次大小以配置的并发上限封顶，约束对外部搜索服务的瞬时压力
        let batch_size = queries.len().min(state.search_parallel_count.max(1));
        println!(
            "🌐 并发执行 {} 条搜索，批次大小 {}",
            queries.len(),
            batch_size
        );

        context
            .notify_progress(&format!(
                "Executing {} web searches to gather information...",
                queries.len()
            ))
            .await;

        let mut all_results: Vec<SearchResult> = Vec::with_capacity(queries.len());

        match self
            .run_batches(context, queries, batch_size, &mut all_results)
            .await
        {
            Ok(()) => {
                println!("✓ 完成 {} 条搜索", all_results.len());

                context
                    .notify_progress(&format!(
                        "Completed all web searches, processing {} results",
                        all_results.len()
                    ))
                    .await;

                let step = format!("Executed {} web searches", all_results.len());
                StageOutcome::Success(WebSearchUpdate {
                    search_results: all_results,
                    steps: vec![step],
                })
            }
            // 编排自身的故障中止剩余批次，但保留已累积的部分结果
            Err(e) => {
                eprintln!("❌ 搜索编排中止: {}", e);
                StageOutcome::degraded(
                    WebSearchUpdate {
                        search_results: all_results,
                        steps: vec![format!("Error executing web searches: {}", e)],
                    },
                    e.to_string(),
                )
            }
        }
    }

    /// 逐批执行：批内所有搜索并发发起并等待全部落定，单个任务的故障
    /// 不会取消同批兄弟任务；结果按原始下标顺序追加到累积器。
    async fn run_batches(
        &self,
        context: &GeneratorContext,
        queries: &[SearchQuery],
        batch_size: usize,
        all_results: &mut Vec<SearchResult>,
    ) -> Result<()> {
        for batch in queries.chunks(batch_size) {
            println!("   处理 {} 条搜索的批次", batch.len());

            let handles: Vec<_> = batch
                .iter()
                .cloned()
                .map(|query| {
                    let search = Arc::clone(&context.search);
                    tokio::spawn(
                        async move { execute_single_search(search.as_ref(), &query).await },
                    )
                })
                .collect();

            let settled = join_all(handles).await;

            // 执行器内部已各自兜底；这里是第二层故障隔离，
            // 覆盖执行器与调度器之间胶水代码中的故障（如任务panic）
            for (slot, joined) in batch.iter().zip(settled) {
                match joined {
                    Ok(result) => all_results.push(result),
                    Err(e) => {
                        eprintln!("❌ 搜索任务执行失败: {}", e);
                        all_results.push(SearchResult::degraded(
                            slot.keywords.clone(),
                            Some(slot.rationale.clone()),
                            format!("Error executing search: {}", e),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
