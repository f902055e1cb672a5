use anyhow::Result;
use clap::Parser;

use learnpath_rs::cli::Args;
use learnpath_rs::generator::workflow::launch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.into_config();

    let learning_path = launch(&config).await?;
    println!(
        "\n✅ 学习路径生成完成: '{}'，共 {} 个模块",
        learning_path.topic, learning_path.metadata.num_modules
    );

    Ok(())
}
