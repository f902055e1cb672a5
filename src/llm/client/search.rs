//! 搜索客户端 - 指向OpenAI兼容的联网搜索对话模型服务（如Perplexity）

use anyhow::Result;
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;

use crate::config::SearchConfig;
use crate::generator::ports::SearchProvider;

const SEARCH_PREAMBLE: &str = "You are a web search assistant. Search the web for the given query and return a comprehensive, factual summary of what you find, citing concrete sources where possible.";

/// 搜索客户端
#[derive(Clone)]
pub struct SearchClient {
    client: rig::providers::openai::Client,
    config: SearchConfig,
}

impl SearchClient {
    /// 创建新的搜索客户端
    pub fn new(config: SearchConfig) -> Self {
        let client = rig::providers::openai::Client::builder(&config.api_key)
            .base_url(&config.api_base_url)
            .build();
        Self { client, config }
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    /// 执行一次搜索调用。本层不做重试，失败由调用方转化为退化结果。
    async fn search(&self, keywords: &str) -> Result<String> {
        let agent = self
            .client
            .completion_model(&self.config.model)
            .completions_api()
            .into_agent_builder()
            .preamble(SEARCH_PREAMBLE)
            .temperature(self.config.temperature)
            .build();

        agent.prompt(keywords).await.map_err(|e| e.into())
    }
}
