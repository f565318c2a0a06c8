//! # 坐标生成器模块
//!
//! 基于种子的伪随机流按需生成互不重复的 `(row, channel)` 坐标，
//! 且只选择每 4 个通道中的第 2 个 (RGBA 中的 G 通道)。
//!
//! 生成采用拒绝采样：每次循环都从伪随机流中依次抽取行和通道，
//! 无论结果是否被接受都会消耗随机流。因此编码和解码必须以完全相同的顺序请求坐标
//! (先长度字段，后载荷)，否则两端的序列会错位。
//!
//! 抽取范围使用 `u32`，保证 32 位与 64 位目标上消耗的随机数相同，序列一致。

use crate::constants::{CHANNELS_PER_PIXEL, ELIGIBLE_CHANNEL};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

/// 栅格中的一个通道位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub channel: usize,
}

impl Coordinate {
    /// 通道是否允许写入 (`channel % 4 == 1`)。
    pub fn is_eligible(&self) -> bool {
        self.channel % CHANNELS_PER_PIXEL == ELIGIBLE_CHANNEL
    }
}

/// 每行中满足 `channel % 4 == 1` 且 `channel < channel_count` 的通道数。
pub fn eligible_per_row(channel_count: u32) -> usize {
    (channel_count as usize + CHANNELS_PER_PIXEL - 1 - ELIGIBLE_CHANNEL) / CHANNELS_PER_PIXEL
}

/// 一次编码或解码调用内使用的坐标生成器。
///
/// 拥有自己的伪随机流和已用坐标集合，调用结束即丢弃。
/// 所有可用坐标都已生成后，`next()` 返回 `None`，而不是无限循环。
pub struct CoordinateGenerator {
    row_count: u32,
    channel_count: u32,
    rng: ChaCha20Rng,
    used: HashSet<Coordinate>,
    capacity: usize,
}

impl CoordinateGenerator {
    pub fn new(row_count: u32, channel_count: u32, seed: u64) -> Self {
        Self {
            row_count,
            channel_count,
            rng: ChaCha20Rng::seed_from_u64(seed),
            used: HashSet::new(),
            capacity: row_count as usize * eligible_per_row(channel_count),
        }
    }

    /// 可生成的坐标总数。
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 尚未生成的坐标数。
    pub fn remaining(&self) -> usize {
        self.capacity - self.used.len()
    }
}

impl Iterator for CoordinateGenerator {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.remaining() == 0 {
            return None;
        }
        loop {
            let row = self.rng.random_range(0..self.row_count);
            let channel = self.rng.random_range(0..self.channel_count);
            let coord = Coordinate {
                row: row as usize,
                channel: channel as usize,
            };
            if coord.is_eligible() && self.used.insert(coord) {
                return Some(coord);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for CoordinateGenerator {}
