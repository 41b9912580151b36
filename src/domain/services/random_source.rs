// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 随机源
///
/// 以能力的形式注入编排器，测试中可替换为固定实现
pub trait RandomSource: Send + Sync {
    /// 返回 `0..len` 范围内的索引，`len` 必须大于 0
    fn pick(&self, len: usize) -> usize;
}

/// 基于线程本地生成器的随机源
///
/// 并发调用之间不共享可变状态
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::random_range(0..len)
    }
}

/// 总是返回同一索引的随机源，超出范围时取最后一个
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
