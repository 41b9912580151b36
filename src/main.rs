// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use scrapebot::application::scraper::{compile_rules, Scraper};
use scrapebot::application::sink::LogSink;
use scrapebot::config::rules;
use scrapebot::config::settings::Settings;
use scrapebot::domain::models::message::{Conversation, User};
use scrapebot::domain::services::random_source::ThreadRandom;
use scrapebot::engines::reqwest_engine::ReqwestEngine;
use scrapebot::infrastructure::metrics;
use scrapebot::utils::errors::RulesFileError;
use scrapebot::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "scrapebot", version, about = "Run a chat command against the scrape rules")]
struct Cli {
    /// 规则文件路径，覆盖配置中的 rules.path
    #[arg(long)]
    rules: Option<PathBuf>,

    /// 列出所有规则的触发器和帮助信息
    #[arg(long)]
    list: bool,

    /// 聊天命令文本
    text: Vec<String>,
}

/// 主函数
///
/// 加载配置和规则，找到第一个匹配命令文本的规则并执行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    let cli = Cli::parse();

    // 2. Load configuration
    let settings = Settings::new()?;
    metrics::init_metrics(&settings.metrics);
    info!("Configuration loaded");

    // 3. Load rules
    let path = cli
        .rules
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.rules.path));
    let rule_list = if settings.rules.create_example {
        rules::load_or_create_rules(&path)
    } else {
        rules::load_rules_file(&path)
    };
    let rule_list = match rule_list {
        Ok(list) => list,
        Err(RulesFileError::ExampleCreated(path)) => {
            warn!("Wrote an empty rules file to {}; add rules and run again", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // 4. Compile scrapers
    let fetcher = Arc::new(ReqwestEngine::from_settings(&settings.http)?);
    let (scrapers, errors) = compile_rules(rule_list, fetcher, Arc::new(ThreadRandom));
    for (index, e) in &errors {
        error!("Rule #{} was not loaded: {}", index, e);
    }
    info!("{} scrape rules ready", scrapers.len());

    if cli.list {
        for scraper in &scrapers {
            println!("{}\t{}", scraper.rule().trigger, scraper.help());
        }
        return Ok(());
    }

    // 5. Dispatch
    let text = cli.text.join(" ");
    let Some((scraper, captures)) = find_match(&scrapers, &text) else {
        warn!("No rule matches {:?}", text);
        return Ok(());
    };

    let conversation = Conversation::new("cli", "stdout");
    let user = User {
        name: std::env::var("USER").unwrap_or_else(|_| "cli".to_string()),
        id: "cli".to_string(),
    };
    scraper.execute(&conversation, &user, &captures, &LogSink).await;

    Ok(())
}

fn find_match<'a>(scrapers: &'a [Arc<Scraper>], text: &str) -> Option<(&'a Scraper, Vec<String>)> {
    scrapers
        .iter()
        .find_map(|scraper| scraper.captures(text).map(|captures| (scraper.as_ref(), captures)))
}
