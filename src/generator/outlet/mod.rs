//! 学习路径落盘

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::learning_path::LearningPath;

/// 保存学习路径
pub async fn save(output_path: &Path, learning_path: &LearningPath) -> Result<()> {
    let outlet = DiskOutlet::new(output_path.to_path_buf());
    outlet.save(learning_path).await
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, learning_path: &LearningPath) -> Result<()>;
}

pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// 渲染学习路径的Markdown文档
    pub fn render_markdown(learning_path: &LearningPath) -> String {
        let mut doc = String::new();
        doc.push_str(&format!("# Learning Path: {}\n\n", learning_path.topic));
        doc.push_str(&format!(
            "> Generated at {} · {} modules\n\n",
            learning_path.metadata.generated_at, learning_path.metadata.num_modules
        ));

        if learning_path.modules.is_empty() {
            doc.push_str("_No modules were generated for this topic._\n");
            return doc;
        }

        for (i, module) in learning_path.modules.iter().enumerate() {
            doc.push_str(&format!("## {}. {}\n\n", i + 1, module.title));
            doc.push_str(&format!("{}\n\n", module.overview));
            doc.push_str("**Learning objectives**\n\n");
            for objective in &module.learning_objectives {
                doc.push_str(&format!("- {}\n", objective));
            }
            doc.push_str(&format!(
                "\n**Why this module matters**: {}\n\n",
                module.importance
            ));
        }

        doc
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, learning_path: &LearningPath) -> Result<()> {
        println!("\n🖊️ 学习路径存储中...");
        fs::create_dir_all(&self.output_dir)?;

        let json_path = self.output_dir.join("learning_path.json");
        fs::write(&json_path, serde_json::to_string_pretty(learning_path)?)?;
        println!("💾 已保存: {}", json_path.display());

        let md_path = self.output_dir.join("learning_path.md");
        fs::write(&md_path, Self::render_markdown(learning_path))?;
        println!("💾 已保存: {}", md_path.display());

        Ok(())
    }
}
