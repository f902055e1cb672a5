//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::Config;
use crate::generator::ports::LanguageModel;
use crate::types::learning_path::ModulePlan;
use crate::types::search::SearchQueryPlan;

mod providers;
pub mod search;

use providers::ModelBackend;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    backend: ModelBackend,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let backend = ModelBackend::connect(&config.llm)?;
        Ok(Self { backend, config })
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts;
        let retry_delay_ms = llm_config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 结构化数据提取方法
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let extractor = self
            .backend
            .extractor::<T>(system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { extractor.extract(user_prompt).await })
            .await
    }

    /// 简化的单轮对话方法
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent = self.backend.agent(system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn extract_query_plan(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<SearchQueryPlan> {
        self.extract::<SearchQueryPlan>(system_prompt, user_prompt)
            .await
    }

    async fn extract_module_plan(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ModulePlan> {
        self.extract::<ModulePlan>(system_prompt, user_prompt).await
    }

    /// 检查模型连接和功能是否正常
    async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .prompt("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }
}
