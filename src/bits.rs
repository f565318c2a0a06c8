//! # 比特编解码模块
//!
//! 在字节序列与比特序列之间转换。所有转换均为低位在前：
//! 字节的第 `i` 个比特为 `(byte >> i) & 1`。比特序列中的每个元素都是 `0` 或 `1`。

use crate::constants::{BITS_PER_BYTE, LENGTH_FIELD_BITS};

/// 将每个字节按低位在前展开为 8 个比特。空输入得到空输出。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).map(move |i| (byte >> i) & 1))
        .collect()
}

/// 以 8 个比特为一组还原字节。
///
/// 输出长度为 `bits.len() / 8`，末尾不足 8 个的比特会被静默丢弃。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|chunk| bits_to_int(chunk) as u8)
        .collect()
}

/// 将长度字段编码为 32 个比特，低位在前。
///
/// 只有 `n` 的低 32 位会被保留，更高的位被截断。
pub fn int32_to_bits(n: u64) -> [u8; LENGTH_FIELD_BITS] {
    std::array::from_fn(|i| ((n >> i) & 1) as u8)
}

/// 将任意长度的比特组 (低位在前) 还原为整数。
///
/// 第 64 个之后的比特超出了结果的宽度，会被忽略。
pub fn bits_to_int(bits: &[u8]) -> u64 {
    bits.iter()
        .take(u64::BITS as usize)
        .enumerate()
        .fold(0, |acc, (i, &bit)| acc | (u64::from(bit & 1) << i))
}
