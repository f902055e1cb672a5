use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 单条搜索查询，由查询生成阶段产出后不再变更
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchQuery {
    /// 提交给搜索服务的查询关键词
    pub keywords: String,
    /// 该查询对理解主题的价值说明
    pub rationale: String,
}

/// 查询生成阶段的结构化输出
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchQueryPlan {
    /// 覆盖主题不同侧面的搜索查询列表
    pub queries: Vec<SearchQuery>,
}

/// 单条搜索结果条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// 结果来源标识，失败占位结果固定为 "Error"
    pub source: String,
    /// 结果正文
    pub content: String,
}

/// 一次搜索的完整结果。失败时退化为占位结果而非缺失数据，
/// `results` 永远非空（失败时恰好包含一条 source 为 "Error" 的条目）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// 原始查询关键词
    pub query: String,
    /// 查询的价值说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// 结果条目，按检索返回顺序排列
    pub results: Vec<ResultItem>,
    /// 失败原因，存在即表示这是一条退化结果
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    /// 成功结果：原始响应文本包装为一条带查询标注的条目
    pub fn succeeded(query: impl Into<String>, rationale: Option<String>, content: String) -> Self {
        let query = query.into();
        let source = format!("Web Search Result for '{}'", query);
        Self {
            query,
            rationale,
            results: vec![ResultItem { source, content }],
            error: None,
        }
    }

    /// 退化结果：保证 `results` 非空的失败占位
    pub fn degraded(query: impl Into<String>, rationale: Option<String>, cause: String) -> Self {
        Self {
            query: query.into(),
            rationale,
            results: vec![ResultItem {
                source: "Error".to_string(),
                content: cause.clone(),
            }],
            error: Some(cause),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
