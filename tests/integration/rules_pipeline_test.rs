// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{compile_rules_text, dispatch};
use scrapebot::application::scraper::compile_rules;
use scrapebot::config::rules::load_rules_file;
use scrapebot::domain::services::random_source::ThreadRandom;
use scrapebot::engines::canned_engine::{CannedEngine, CannedResponse};
use scrapebot::utils::errors::{RuleError, PROCESSING_FAILED, URL_BUILD_FAILED};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

const RULES: &str = r#"
- Trigger: "^!quotes"
  Capture: "(.*)"
  URL: "http://quotes.test/random"
  Title:
    Template: "Quotes"
  Captures:
    - Body:
        Selectors: ["blockquote"]
        Template: "> %s"
    - Title:
        Selectors: ["cite"]
        Template: "by %s"
      Body:
        Selectors: ["blockquote"]
        Template: "%s"
        HandleMultiple: Last
  Delay: 1000
- Trigger: "^!hash"
  Capture: "(\\w+) (\\w+)"
  Format: Json
  URL: "http://hash.test/%s/%s?token="
  Title:
    Selectors: ["name"]
    Template: "%s"
  Token:
    Prefix: "Y"
    Postfix: "X"
    Size: 6
    Type: MD5
- Trigger: "^!pair"
  Capture: "(\\w+)"
  URL: "http://pair.test/%s/%s"
  Title:
    Template: "Pair"
"#;

const QUOTES: &str = r#"
<html><body>
<blockquote>Simple is better than complex.</blockquote>
<cite>Tim</cite>
<blockquote>Readability counts.</blockquote>
</body></html>
"#;

fn canned() -> Arc<CannedEngine> {
    Arc::new(CannedEngine::from_fn(|url| {
        if url.starts_with("http://quotes.test") {
            CannedResponse::body(QUOTES)
        } else if url.starts_with("http://hash.test") {
            CannedResponse::body(r#"{"name": "hashed"}"#)
        } else {
            CannedResponse::Unreachable
        }
    }))
}

#[tokio::test(start_paused = true)]
async fn test_ungrouped_rule_sends_each_capture_after_delay() {
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(dir.path(), "scrapers.yaml", RULES, canned());

    let started = Instant::now();
    let messages = dispatch(&scrapers, "!quotes").await;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].title, "Quotes");
    assert_eq!(messages[0].description, "> Simple is better than complex.");
    assert_eq!(messages[1].title, "by Tim");
    assert_eq!(messages[1].description, "Readability counts.");
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test]
async fn test_token_is_appended_to_request_url() {
    let dir = TempDir::new().unwrap();
    let engine = canned();
    let scrapers = compile_rules_text(dir.path(), "scrapers.yaml", RULES, engine.clone());

    let messages = dispatch(&scrapers, "!hash Hello World").await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].title, "hashed");
    assert_eq!(
        engine.requests(),
        vec!["http://hash.test/Hello/World?token=2d1105".to_string()]
    );
}

#[tokio::test]
async fn test_url_build_failure_skips_fetch() {
    let dir = TempDir::new().unwrap();
    let engine = canned();
    let scrapers = compile_rules_text(dir.path(), "scrapers.yaml", RULES, engine.clone());

    let messages = dispatch(&scrapers, "!pair one").await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].description, URL_BUILD_FAILED);
    assert!(messages[0].url.is_none());
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn test_broken_stream_reports_processing_failure() {
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(
        dir.path(),
        "scrapers.yaml",
        RULES,
        Arc::new(CannedEngine::broken_stream()),
    );

    let messages = dispatch(&scrapers, "!quotes").await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].description, PROCESSING_FAILED);
    assert!(messages[0].url.is_none());
}

#[test]
fn test_invalid_rules_are_reported_by_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scrapers.json");
    std::fs::write(
        &path,
        r#"[
            {"Trigger": "^!ok", "Capture": ".*", "URL": "http://ok.test"},
            {"Trigger": "(", "Capture": ".*", "URL": "http://bad.test"},
            {"Trigger": "^!css", "Capture": ".*", "URL": "http://css.test",
             "Title": {"Selectors": ["h1[["], "Template": "%s"}}
        ]"#,
    )
    .unwrap();

    let rule_list = load_rules_file(&path).unwrap();
    let (scrapers, errors) = compile_rules(
        rule_list,
        Arc::new(CannedEngine::always("<html></html>")),
        Arc::new(ThreadRandom),
    );

    assert_eq!(scrapers.len(), 1);
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], (1, RuleError::InvalidTrigger { .. })));
    assert!(matches!(errors[1], (2, RuleError::InvalidSelector { .. })));
}
