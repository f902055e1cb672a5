//! Provider后端封装 - 把rig的各provider客户端收拢到一个枚举后面

use anyhow::Result;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::Prompt,
    extractor::Extractor,
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{LLMConfig, LLMProvider};

/// Gemini要求把生成参数打包进additional_params传递
fn gemini_generation_params() -> serde_json::Value {
    let params = AdditionalParameters::default().with_config(GenerationConfig::default());
    serde_json::to_value(params).unwrap_or_default()
}

/// 模型后端。生成类调用（查询计划、模块计划）统一走这里，
/// provider差异被限制在本文件内。
#[derive(Clone)]
pub enum ModelBackend {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Anthropic(rig::providers::anthropic::Client),
    Gemini(rig::providers::gemini::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ModelBackend {
    /// 按配置连接对应的provider
    pub fn connect(config: &LLMConfig) -> Result<Self> {
        let backend = match config.provider {
            LLMProvider::OpenAI => ModelBackend::OpenAI(
                rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::DeepSeek => ModelBackend::DeepSeek(
                rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::Anthropic => ModelBackend::Anthropic(
                rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?,
            ),
            LLMProvider::Gemini => {
                ModelBackend::Gemini(rig::providers::gemini::Client::builder(&config.api_key).build()?)
            }
            LLMProvider::Ollama => {
                ModelBackend::Ollama(rig::providers::ollama::Client::builder().build())
            }
        };
        Ok(backend)
    }

    /// 组装一个带系统提示词的对话agent
    pub fn agent(&self, system_prompt: &str, config: &LLMConfig) -> ChatAgent {
        let model = config.model.as_str();
        match self {
            // OpenAI兼容端点走completions API，覆盖那些不支持responses API的网关
            ModelBackend::OpenAI(client) => ChatAgent::OpenAI(
                client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .build(),
            ),
            ModelBackend::DeepSeek(client) => ChatAgent::DeepSeek(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .temperature(config.temperature)
                    .build(),
            ),
            ModelBackend::Anthropic(client) => ChatAgent::Anthropic(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .build(),
            ),
            ModelBackend::Gemini(client) => ChatAgent::Gemini(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .additional_params(gemini_generation_params())
                    .build(),
            ),
            ModelBackend::Ollama(client) => ChatAgent::Ollama(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .build(),
            ),
        }
    }

    /// 组装一个面向目标schema的结构化提取器
    pub fn extractor<T>(&self, system_prompt: &str, config: &LLMConfig) -> PlanExtractor<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let model = config.model.as_str();
        match self {
            ModelBackend::OpenAI(client) => PlanExtractor::OpenAI(
                client
                    .extractor_completions_api::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .build(),
            ),
            ModelBackend::DeepSeek(client) => PlanExtractor::DeepSeek(
                client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .build(),
            ),
            ModelBackend::Anthropic(client) => PlanExtractor::Anthropic(
                client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .build(),
            ),
            ModelBackend::Gemini(client) => PlanExtractor::Gemini(
                client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .additional_params(gemini_generation_params())
                    .build(),
            ),
            ModelBackend::Ollama(client) => PlanExtractor::Ollama(
                client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .build(),
            ),
        }
    }
}

/// provider无关的对话agent
pub enum ChatAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ChatAgent {
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ChatAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(Into::into),
            ChatAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(Into::into),
            ChatAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(Into::into),
            ChatAgent::Gemini(agent) => agent.prompt(prompt).await.map_err(Into::into),
            ChatAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(Into::into),
        }
    }
}

/// provider无关的结构化提取器
pub enum PlanExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    OpenAI(Extractor<rig::providers::openai::CompletionModel, T>),
    DeepSeek(Extractor<rig::providers::deepseek::CompletionModel, T>),
    Anthropic(Extractor<rig::providers::anthropic::completion::CompletionModel, T>),
    Gemini(Extractor<rig::providers::gemini::completion::CompletionModel, T>),
    Ollama(Extractor<rig::providers::ollama::CompletionModel<reqwest::Client>, T>),
}

impl<T> PlanExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    pub async fn extract(&self, prompt: &str) -> Result<T> {
        match self {
            PlanExtractor::OpenAI(extractor) => extractor.extract(prompt).await.map_err(Into::into),
            PlanExtractor::DeepSeek(extractor) => {
                extractor.extract(prompt).await.map_err(Into::into)
            }
            PlanExtractor::Anthropic(extractor) => {
                extractor.extract(prompt).await.map_err(Into::into)
            }
            PlanExtractor::Gemini(extractor) => extractor.extract(prompt).await.map_err(Into::into),
            PlanExtractor::Ollama(extractor) => extractor.extract(prompt).await.map_err(Into::into),
        }
    }
}
