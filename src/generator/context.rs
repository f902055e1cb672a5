use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::generator::ports::{LanguageModel, ProgressNotifier, SearchProvider};
use crate::llm::client::LLMClient;
use crate::llm::client::search::SearchClient;

/// 生成器上下文 - 配置与各外部协作者端口的组合
#[derive(Clone)]
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 语言模型端口，用于查询生成与路径合成
    pub llm: Arc<dyn LanguageModel>,
    /// 搜索端口
    pub search: Arc<dyn SearchProvider>,
    /// 可选的进度通知端口
    pub progress: Option<Arc<dyn ProgressNotifier>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文。密钥缺失只告警，构造照常进行，
    /// 失败推迟到调用时由各阶段的退化路径吸收。
    pub fn new(config: Config) -> Result<Self> {
        if config.llm.api_key.is_empty() {
            eprintln!("⚠️ 警告: 未配置LLM API KEY，模型调用可能失败");
        }
        if config.search.api_key.is_empty() {
            eprintln!("⚠️ 警告: 未配置搜索服务 API KEY，搜索调用可能失败");
        }

        let llm = Arc::new(LLMClient::new(config.clone())?);
        let search = Arc::new(SearchClient::new(config.search.clone()));

        Ok(Self {
            config,
            llm,
            search,
            progress: None,
        })
    }

    /// 用外部提供的端口组装上下文
    pub fn with_ports(
        config: Config,
        llm: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchProvider>,
        progress: Option<Arc<dyn ProgressNotifier>>,
    ) -> Self {
        Self {
            config,
            llm,
            search,
            progress,
        }
    }

    /// 挂接进度通知器
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// 发送进度通知，通知器缺席时为空操作
    pub async fn notify_progress(&self, message: &str) {
        if let Some(progress) = &self.progress {
            progress.notify(message).await;
        }
    }
}
