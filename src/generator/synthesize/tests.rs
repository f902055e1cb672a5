#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::config::Config;
    use crate::generator::context::GeneratorContext;
    use crate::generator::ports::{LanguageModel, SearchProvider};
    use crate::generator::state::PipelineState;
    use crate::generator::synthesize::{EXCERPTS_PER_SEARCH, PathSynthesizer};
    use crate::i18n::TargetLanguage;
    use crate::types::learning_path::{Module, ModulePlan};
    use crate::types::search::{ResultItem, SearchQueryPlan, SearchResult};

    fn make_module(title: &str) -> Module {
        Module {
            title: title.to_string(),
            overview: format!("Overview of {}", title),
            learning_objectives: vec!["objective 1".to_string(), "objective 2".to_string()],
            importance: "foundational".to_string(),
        }
    }

    /// 返回预置模块计划的模型桩
    struct StubModel {
        modules: Vec<Module>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn returning(modules: Vec<Module>) -> Self {
            Self {
                modules,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                modules: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn extract_query_plan(&self, _: &str, _: &str) -> Result<SearchQueryPlan> {
            anyhow::bail!("not expected in synthesis tests")
        }

        async fn extract_module_plan(&self, _: &str, _: &str) -> Result<ModulePlan> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("synthesis failed");
            }
            Ok(ModulePlan {
                modules: self.modules.clone(),
            })
        }
    }

    struct UnusedSearch;

    #[async_trait]
    impl SearchProvider for UnusedSearch {
        async fn search(&self, _: &str) -> Result<String> {
            anyhow::bail!("not expected in synthesis tests")
        }
    }

    fn make_context(model: Arc<StubModel>, desired: Option<usize>) -> GeneratorContext {
        let config = Config {
            topic: "Graph theory".to_string(),
            desired_module_count: desired,
            ..Default::default()
        };
        GeneratorContext::with_ports(config, model, Arc::new(UnusedSearch), None)
    }

    fn make_state_with_results(context: &GeneratorContext, n: usize) -> PipelineState {
        let mut state = PipelineState::from_config(&context.config);
        state.search_results = (0..n)
            .map(|i| {
                SearchResult::succeeded(
                    format!("query {}", i),
                    Some(format!("rationale {}", i)),
                    format!("content {}", i),
                )
            })
            .collect();
        state
    }

    #[tokio::test]
    async fn test_synthesizes_path_from_results() {
        let model = Arc::new(StubModel::returning(vec![
            make_module("Basics"),
            make_module("Traversal"),
            make_module("Shortest paths"),
        ]));
        let context = make_context(model.clone(), None);
        let state = make_state_with_results(&context, 3);

        let outcome = PathSynthesizer.execute(&context, &state).await;

        assert!(!outcome.is_degraded());
        let update = outcome.into_value();
        assert_eq!(update.modules.len(), 3);
        assert_eq!(update.final_learning_path.topic, "Graph theory");
        assert_eq!(update.final_learning_path.metadata.num_modules, 3);
        assert_eq!(update.steps, vec!["Created learning path with 3 modules".to_string()]);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_results_short_circuit_without_model_call() {
        let model = Arc::new(StubModel::returning(vec![make_module("Unused")]));
        let context = make_context(model.clone(), None);
        let state = PipelineState::from_config(&context.config);

        let outcome = PathSynthesizer.execute(&context, &state).await;

        assert!(!outcome.is_degraded());
        let update = outcome.into_value();
        assert!(update.modules.is_empty());
        assert_eq!(update.final_learning_path.topic, "Graph theory");
        assert_eq!(update.steps, vec!["No search results available".to_string()]);
        // 无输入时不发起模型调用
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty_path_with_topic() {
        let model = Arc::new(StubModel::failing());
        let context = make_context(model, None);
        let state = make_state_with_results(&context, 2);

        let outcome = PathSynthesizer.execute(&context, &state).await;

        assert!(outcome.is_degraded());
        assert_eq!(outcome.cause(), Some("synthesis failed"));
        let update = outcome.into_value();
        assert!(update.modules.is_empty());
        assert_eq!(update.final_learning_path.topic, "Graph theory");
        assert!(update.steps[0].starts_with("Error creating learning path:"));
    }

    #[tokio::test]
    async fn test_overcount_truncated_to_desired() {
        let model = Arc::new(StubModel::returning(vec![
            make_module("M1"),
            make_module("M2"),
            make_module("M3"),
            make_module("M4"),
            make_module("M5"),
            make_module("M6"),
        ]));
        let context = make_context(model, Some(4));
        let state = make_state_with_results(&context, 2);

        let update = PathSynthesizer.execute(&context, &state).await.into_value();

        // 超出期望值时截断，保留顺序靠前的模块
        assert_eq!(update.modules.len(), 4);
        assert_eq!(update.modules[0].title, "M1");
        assert_eq!(update.modules[3].title, "M4");
        assert_eq!(update.final_learning_path.metadata.num_modules, 4);
    }

    #[tokio::test]
    async fn test_undercount_accepted_as_is() {
        let model = Arc::new(StubModel::returning(vec![
            make_module("M1"),
            make_module("M2"),
        ]));
        let context = make_context(model, Some(4));
        let state = make_state_with_results(&context, 2);

        let update = PathSynthesizer.execute(&context, &state).await.into_value();

        // 不足时接受缺口，不补齐
        assert_eq!(update.modules.len(), 2);
    }

    #[test]
    fn test_process_results_escapes_braces() {
        let results = vec![SearchResult::succeeded(
            "rust {generics}",
            None,
            "impl<T> Trait for {T} where T: Clone".to_string(),
        )];

        let processed = PathSynthesizer::process_search_results(&results);

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].query, "rust {{generics}}");
        assert!(processed[0].relevant_information.contains("{{T}}"));
        assert!(!processed[0].relevant_information.contains("for {T}"));
    }

    #[test]
    fn test_process_results_caps_excerpts() {
        let items: Vec<ResultItem> = (0..5)
            .map(|i| ResultItem {
                source: format!("source {}", i),
                content: format!("content {}", i),
            })
            .collect();
        let results = vec![SearchResult {
            query: "query".to_string(),
            rationale: None,
            results: items,
            error: None,
        }];

        let processed = PathSynthesizer::process_search_results(&results);

        let info = &processed[0].relevant_information;
        for i in 0..EXCERPTS_PER_SEARCH {
            assert!(info.contains(&format!("content {}", i)));
        }
        assert!(!info.contains("content 3"));
        assert!(!info.contains("content 4"));
    }

    #[test]
    fn test_process_results_skips_empty_item_lists() {
        let results = vec![
            SearchResult {
                query: "empty query".to_string(),
                rationale: None,
                results: Vec::new(),
                error: None,
            },
            SearchResult::succeeded("good query", None, "useful content".to_string()),
        ];

        let processed = PathSynthesizer::process_search_results(&results);

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].query, "good query");
    }

    #[test]
    fn test_degraded_results_feed_synthesis_as_error_excerpts() {
        // 退化结果不被过滤，其 "Error" 占位条目原样进入素材
        let results = vec![SearchResult::degraded(
            "failed query",
            None,
            "Error performing search: timeout".to_string(),
        )];

        let processed = PathSynthesizer::process_search_results(&results);

        assert_eq!(processed.len(), 1);
        assert!(processed[0].relevant_information.contains("Source: Error"));
        assert!(processed[0].relevant_information.contains("timeout"));
    }

    #[test]
    fn test_user_prompt_exact_count_instruction() {
        let prompt = PathSynthesizer::build_user_prompt(
            "Topic",
            &[],
            Some(4),
            &TargetLanguage::English,
        );
        assert!(prompt.contains("Create EXACTLY 4 modules"));

        let prompt = PathSynthesizer::build_user_prompt("Topic", &[], None, &TargetLanguage::English);
        assert!(prompt.contains("3 to 7 modules"));
    }

    #[test]
    fn test_user_prompt_escapes_topic_and_carries_language() {
        let prompt = PathSynthesizer::build_user_prompt(
            "C++ {templates}",
            &[],
            None,
            &TargetLanguage::Japanese,
        );

        assert!(prompt.contains("C++ {{templates}}"));
        assert!(prompt.contains("Create all content in 日本語"));
    }

    #[test]
    fn test_enforce_module_count_without_desired_is_identity() {
        let modules = vec![make_module("A"), make_module("B")];
        let kept = PathSynthesizer::enforce_module_count(modules.clone(), None);
        assert_eq!(kept.len(), modules.len());
    }
}
