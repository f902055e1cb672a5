use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::i18n::TargetLanguage;
use crate::types::learning_path::{LearningPath, Module};
use crate::types::search::{SearchQuery, SearchResult};

/// 管线阶段状态机。每个阶段都可以退化为空结果变体继续前进，
/// 管线总是到达 Done，不存在硬失败终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    GeneratingQueries,
    SearchingWeb,
    SynthesizingPath,
    Done,
}

impl PipelinePhase {
    pub fn next(self) -> Self {
        match self {
            PipelinePhase::Idle => PipelinePhase::GeneratingQueries,
            PipelinePhase::GeneratingQueries => PipelinePhase::SearchingWeb,
            PipelinePhase::SearchingWeb => PipelinePhase::SynthesizingPath,
            PipelinePhase::SynthesizingPath => PipelinePhase::Done,
            PipelinePhase::Done => PipelinePhase::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelinePhase::Idle => "idle",
            PipelinePhase::GeneratingQueries => "generating_queries",
            PipelinePhase::SearchingWeb => "searching_web",
            PipelinePhase::SynthesizingPath => "synthesizing_path",
            PipelinePhase::Done => "done",
        }
    }
}

/// 贯穿所有阶段的共享管线状态。阶段自身不直接修改它，
/// 而是返回部分更新，由工作流逐字段合并。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// 用户主题
    pub user_topic: String,
    /// 学习内容语言
    pub language: TargetLanguage,
    /// 搜索查询语言
    pub search_language: TargetLanguage,
    /// 期望模块数量
    pub desired_module_count: Option<usize>,
    /// 单批次并发搜索上限
    pub search_parallel_count: usize,
    /// 查询生成阶段产出
    pub search_queries: Vec<SearchQuery>,
    /// 搜索编排阶段产出
    pub search_results: Vec<SearchResult>,
    /// 路径合成阶段产出
    pub modules: Vec<Module>,
    /// 最终学习路径
    pub final_learning_path: Option<LearningPath>,
    /// 只追加的可读执行轨迹
    pub steps: Vec<String>,
    /// 当前阶段
    pub phase: PipelinePhase,
}

impl PipelineState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_topic: config.topic.clone(),
            language: config.language.clone(),
            search_language: config.search_language.clone(),
            desired_module_count: config.desired_module_count,
            search_parallel_count: config.search_parallel_count,
            search_queries: Vec::new(),
            search_results: Vec::new(),
            modules: Vec::new(),
            final_learning_path: None,
            steps: Vec::new(),
            phase: PipelinePhase::Idle,
        }
    }

    /// 状态机推进到下一阶段
    pub fn advance(&mut self) {
        self.phase = self.phase.next();
    }

    pub fn apply_query_generation(&mut self, update: QueryGenerationUpdate) {
        self.search_queries = update.search_queries;
        self.steps.extend(update.steps);
    }

    pub fn apply_web_search(&mut self, update: WebSearchUpdate) {
        self.search_results = update.search_results;
        self.steps.extend(update.steps);
    }

    pub fn apply_path_synthesis(&mut self, update: PathSynthesisUpdate) {
        self.modules = update.modules;
        self.final_learning_path = Some(update.final_learning_path);
        self.steps.extend(update.steps);
    }
}

/// 查询生成阶段的部分更新
#[derive(Debug, Clone)]
pub struct QueryGenerationUpdate {
    pub search_queries: Vec<SearchQuery>,
    pub steps: Vec<String>,
}

/// 搜索编排阶段的部分更新
#[derive(Debug, Clone)]
pub struct WebSearchUpdate {
    pub search_results: Vec<SearchResult>,
    pub steps: Vec<String>,
}

/// 路径合成阶段的部分更新
#[derive(Debug, Clone)]
pub struct PathSynthesisUpdate {
    pub modules: Vec<Module>,
    pub final_learning_path: LearningPath,
    pub steps: Vec<String>,
}
