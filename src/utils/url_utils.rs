// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::template_service::TemplateService;
use crate::utils::errors::UrlBuildError;

/// 将触发器捕获组代入URL模板
///
/// `captures` 不包含整体匹配。前 n 个捕获从左到右代入 n 个 `%s` 占位符，
/// 每个捕获都先做百分号转义；多余的捕获被忽略。不含占位符的模板原样返回，
/// 其中的 `%%` 不做转义处理。
pub fn build_url(template: &str, captures: &[String]) -> Result<String, UrlBuildError> {
    let expected = TemplateService::placeholder_count(template);
    if captures.len() < expected {
        return Err(UrlBuildError::MissingCaptures {
            expected,
            supplied: captures.len(),
        });
    }

    if expected == 0 {
        return Ok(template.to_string());
    }

    let escaped: Vec<String> = captures[..expected]
        .iter()
        .map(|capture| urlencoding::encode(capture).into_owned())
        .collect();
    let values: Vec<&str> = escaped.iter().map(String::as_str).collect();

    Ok(TemplateService::fill(template, &values))
}
