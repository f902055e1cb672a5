#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMProvider};
    use crate::i18n::TargetLanguage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.topic.is_empty());
        assert_eq!(config.output_path, PathBuf::from("./learnpath.out"));
        assert_eq!(config.language, TargetLanguage::English);
        assert_eq!(config.search_language, TargetLanguage::English);
        assert!(config.desired_module_count.is_none());
        assert_eq!(config.search_parallel_count, 3);
        assert!(!config.verbose);
    }

    #[test]
    fn test_default_llm_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        // api_key may be empty if env var is not set
        assert!(!config.llm.api_base_url.is_empty());
        assert!(!config.llm.model.is_empty());
        assert_eq!(config.llm.temperature, 0.1);
        assert_eq!(config.llm.retry_attempts, 5);
        assert_eq!(config.llm.retry_delay_ms, 5000);
    }

    #[test]
    fn test_default_search_config() {
        let config = Config::default();

        assert_eq!(config.search.api_base_url, "https://api.perplexity.ai");
        assert_eq!(config.search.model, "sonar");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("openai".parse::<LLMProvider>(), Ok(LLMProvider::OpenAI));
        assert_eq!("DeepSeek".parse::<LLMProvider>(), Ok(LLMProvider::DeepSeek));
        assert_eq!(
            "anthropic".parse::<LLMProvider>(),
            Ok(LLMProvider::Anthropic)
        );
        assert_eq!("gemini".parse::<LLMProvider>(), Ok(LLMProvider::Gemini));
        assert_eq!("ollama".parse::<LLMProvider>(), Ok(LLMProvider::Ollama));
        assert!("nope".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_provider_display_roundtrip() {
        for provider in [
            LLMProvider::OpenAI,
            LLMProvider::DeepSeek,
            LLMProvider::Anthropic,
            LLMProvider::Gemini,
            LLMProvider::Ollama,
        ] {
            let parsed = provider.to_string().parse::<LLMProvider>().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("learnpath.toml");
        let content = r#"
topic = "Linear algebra"
search_parallel_count = 2
desired_module_count = 4
language = "zh"

[llm]
provider = "deepseek"
model = "deepseek-chat"

[search]
model = "sonar-pro"
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.topic, "Linear algebra");
        assert_eq!(config.search_parallel_count, 2);
        assert_eq!(config.desired_module_count, Some(4));
        assert_eq!(config.language, TargetLanguage::Chinese);
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.search.model, "sonar-pro");
        // 未出现的字段保持默认值
        assert_eq!(config.search_language, TargetLanguage::English);
        assert_eq!(config.llm.retry_attempts, 5);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/learnpath.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("learnpath.toml");
        std::fs::write(&config_path, "topic = [not valid").unwrap();

        let result = Config::from_file(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_language_from_str() {
        assert_eq!(
            "english".parse::<TargetLanguage>(),
            Ok(TargetLanguage::English)
        );
        assert_eq!("中文".parse::<TargetLanguage>(), Ok(TargetLanguage::Chinese));
        assert_eq!("ES".parse::<TargetLanguage>(), Ok(TargetLanguage::Spanish));
        assert!("klingon".parse::<TargetLanguage>().is_err());
    }
}
