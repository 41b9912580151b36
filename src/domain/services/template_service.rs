// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::rule::Replacement;

/// 模板片段
enum Segment<'a> {
    Literal(&'a str),
    Percent,
    Placeholder,
}

/// 将模板切分为字面量、转义的 `%%` 和 `%s` 占位符
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        match rest.as_bytes().get(pos + 1) {
            Some(b's') => {
                out.push(Segment::Literal(&rest[..pos]));
                out.push(Segment::Placeholder);
                rest = &rest[pos + 2..];
            }
            Some(b'%') => {
                out.push(Segment::Literal(&rest[..pos]));
                out.push(Segment::Percent);
                rest = &rest[pos + 2..];
            }
            _ => {
                // A lone '%' is kept verbatim
                out.push(Segment::Literal(&rest[..=pos]));
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push(Segment::Literal(rest));
    out
}

/// 模板服务
///
/// 负责字面替换和 `%s` 占位符替换
pub struct TemplateService;

impl TemplateService {
    /// 统计模板中的占位符数量
    pub fn placeholder_count(template: &str) -> usize {
        segments(template)
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder))
            .count()
    }

    pub fn has_placeholder(template: &str) -> bool {
        Self::placeholder_count(template) > 0
    }

    /// 按顺序应用字面替换，后面的替换作用于前面替换的结果
    pub fn apply_replacements(value: &str, replacements: &[Replacement]) -> String {
        replacements
            .iter()
            .filter(|r| !r.from.is_empty())
            .fold(value.to_string(), |acc, r| acc.replace(&r.from, &r.to))
    }

    /// 从左到右填充占位符
    ///
    /// 占位符多于提供的值时，多出的占位符重复使用最后一个值；
    /// 没有提供任何值时占位符原样保留。
    pub fn fill(template: &str, values: &[&str]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut next = 0;

        for segment in segments(template) {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Percent => out.push('%'),
                Segment::Placeholder => match values.get(next).or(values.last()) {
                    Some(value) => {
                        out.push_str(value);
                        next += 1;
                    }
                    None => out.push_str("%s"),
                },
            }
        }
        out
    }

    /// 对提取到的原始值应用替换表和模板
    ///
    /// # 参数
    ///
    /// * `raw` - 提取到的原始文本
    /// * `replacements` - 按顺序应用的替换对
    /// * `template` - 回复模板，不含占位符时原样返回
    pub fn apply(raw: &str, replacements: &[Replacement], template: &str) -> String {
        let replaced = Self::apply_replacements(raw, replacements);
        Self::fill(template, &[replaced.as_str()])
    }
}
