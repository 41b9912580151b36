// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{compile_rules_text, dispatch, start_test_site};
use scrapebot::engines::reqwest_engine::ReqwestEngine;
use scrapebot::engines::traits::ContentFetcher;
use scrapebot::utils::errors::{PAGE_NOT_FOUND, RETRIEVAL_FAILED};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn engine() -> Arc<dyn ContentFetcher> {
    Arc::new(ReqwestEngine::new(Duration::from_secs(10), "scrapebot-test/1.0").unwrap())
}

fn rules(base: &str) -> String {
    format!(
        r#"[
  {{
    "Trigger": "^!wiki\\b",
    "Capture": "(.+)",
    "URL": "{base}/wiki/%s",
    "Title": {{"Selectors": ["h1#title"], "Template": "%s"}},
    "Captures": [
      {{"Body": {{"Selectors": ["p.summary"], "Template": "%s", "Replacements": [{{"  ": " "}}]}}}}
    ],
    "Help": "!wiki <term>"
  }},
  {{
    "Trigger": "^!weather\\b",
    "Capture": "(\\w+)",
    "Format": "Json",
    "URL": "{base}/api/weather/%s",
    "Title": {{"Selectors": ["location.name"], "Template": "Weather in %s"}},
    "Captures": [
      {{"Title": {{"Template": "Temperature"}}, "Body": {{"Selectors": ["current.temp"], "Template": "%s°C"}}}},
      {{"Title": {{"Template": "Latest alert"}}, "Body": {{"Selectors": ["alerts"], "Template": "%s", "HandleMultiple": "Last"}}}}
    ],
    "Description": "Current conditions",
    "Grouped": true
  }},
  {{"Trigger": "^!blank", "Capture": ".*", "URL": "{base}/blank", "Title": {{"Selectors": ["h1"], "Template": "%s"}}}},
  {{"Trigger": "^!missing", "Capture": ".*", "URL": "{base}/missing", "Title": {{"Selectors": ["h1"], "Template": "%s"}}}}
]"#
    )
}

#[tokio::test]
async fn test_html_rule_over_http() {
    let base = start_test_site().await;
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(dir.path(), "scrapers.json", &rules(&base), engine());

    let messages = dispatch(&scrapers, "!wiki Rust lang").await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].title, "Rust lang");
    assert_eq!(messages[0].description, "Rust lang is a topic.");
    assert_eq!(
        messages[0].url.as_deref(),
        Some(format!("{}/wiki/Rust%20lang", base).as_str())
    );
}

#[tokio::test]
async fn test_grouped_json_rule_over_http() {
    let base = start_test_site().await;
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(dir.path(), "scrapers.json", &rules(&base), engine());

    let messages = dispatch(&scrapers, "!weather Oslo").await;

    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.title, "Weather in Oslo");
    assert_eq!(message.description, "Current conditions");
    assert_eq!(message.fields.len(), 2);
    assert_eq!(message.fields[0].name, "Temperature");
    assert_eq!(message.fields[0].value, "21°C");
    assert_eq!(message.fields[1].name, "Latest alert");
    assert_eq!(message.fields[1].value, "Flood");
}

#[tokio::test]
async fn test_blank_page_reports_not_found() {
    let base = start_test_site().await;
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(dir.path(), "scrapers.json", &rules(&base), engine());

    let messages = dispatch(&scrapers, "!blank").await;

    let url = format!("{}/blank", base);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].description, format!("{} {}", PAGE_NOT_FOUND, url));
    assert_eq!(messages[0].url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_missing_page_reports_retrieval_failure() {
    let base = start_test_site().await;
    let dir = TempDir::new().unwrap();
    let scrapers = compile_rules_text(dir.path(), "scrapers.json", &rules(&base), engine());

    let messages = dispatch(&scrapers, "!missing").await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].description, RETRIEVAL_FAILED);
    assert_eq!(
        messages[0].url.as_deref(),
        Some(format!("{}/missing", base).as_str())
    );
}
