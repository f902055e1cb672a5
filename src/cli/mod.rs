use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use clap::Parser;
use std::path::PathBuf;

/// learnpath-rs - 由Rust与AI驱动的学习路径生成引擎
#[derive(Parser, Debug)]
#[command(name = "learnpath-rs")]
#[command(
    about = "AI-based learning path generation engine. Given a topic, it generates targeted search queries, gathers information through a search-capable LLM, and synthesizes the results into a structured curriculum of learning modules."
)]
#[command(version)]
pub struct Args {
    /// 学习主题
    pub topic: String,

    /// 输出路径
    #[arg(short, long, default_value = "./learnpath.out")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 期望生成的模块数量（不指定则由模型在3-7之间自行决定）
    #[arg(short, long)]
    pub modules: Option<usize>,

    /// 学习内容的目标语言 (en, zh, ja, ko, de, fr, es, ru)
    #[arg(short, long)]
    pub language: Option<String>,

    /// 搜索查询使用的语言，可以与内容语言不同
    #[arg(long)]
    pub search_language: Option<String>,

    /// 单批次并发执行的搜索数量上限
    #[arg(long)]
    pub search_parallel_count: Option<usize>,

    /// LLM Provider (openai, deepseek, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 用于查询生成与路径合成的模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 搜索服务 API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 搜索服务 API基地址
    #[arg(long)]
    pub search_api_base_url: Option<String>,

    /// 搜索模型
    #[arg(long)]
    pub search_model: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("learnpath.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 主题与输出路径始终来自命令行
        config.topic = self.topic;
        config.output_path = self.output_path;

        if let Some(modules) = self.modules {
            config.desired_module_count = Some(modules);
        }
        if let Some(count) = self.search_parallel_count {
            config.search_parallel_count = count;
        }

        // 语言配置
        if let Some(language_str) = self.language {
            if let Ok(language) = language_str.parse::<TargetLanguage>() {
                config.language = language;
            } else {
                eprintln!("⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)", language_str);
            }
        }
        if let Some(search_language_str) = self.search_language {
            if let Ok(search_language) = search_language_str.parse::<TargetLanguage>() {
                config.search_language = search_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的搜索语言: {}，使用默认语言 (English)",
                    search_language_str
                );
            }
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 覆盖搜索服务配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(search_api_base_url) = self.search_api_base_url {
            config.search.api_base_url = search_api_base_url;
        }
        if let Some(search_model) = self.search_model {
            config.search.model = search_model;
        }

        config.verbose = self.verbose;

        config
    }
}
