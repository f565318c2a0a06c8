//! # 错误类型模块
//!
//! 定义库层面的错误分类。命令处理层使用 `anyhow` 为这些错误附加上下文，
//! `main` 再根据错误类别选择进程退出码。

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum StegoError {
    /// 需要写入或读取的比特数超过了载体中可用的坐标数。
    #[error("Not enough space in the image: {required} bits are required, but only {available} are available.")]
    CapacityExceeded { required: usize, available: usize },

    /// 载荷的字节数无法用 32 位长度字段表示。
    #[error("Payload of {len} bytes does not fit into the 32-bit length field.")]
    PayloadTooLarge { len: usize },

    /// 载体无法解码为栅格，或尺寸退化。
    #[error("Malformed carrier image: {reason}")]
    MalformedCarrier { reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    /// 重新编码载体图像失败。
    #[error("Failed to encode the carrier image: {0}")]
    Encoding(#[source] image::ImageError),
}

impl StegoError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCarrier {
            reason: reason.into(),
        }
    }

    /// 每种错误对应一个不同的非零退出码。
    ///
    /// `1` 留给非库错误，`2` 由 `clap` 用于参数错误。
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CapacityExceeded { .. } | Self::PayloadTooLarge { .. } => 3,
            Self::MalformedCarrier { .. } => 4,
            Self::Io(_) => 5,
            Self::Encoding(_) => 6,
        }
    }
}

/// 在 `anyhow` 错误链中查找库错误并返回其退出码，找不到时返回 `1`。
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StegoError>())
        .map_or(1, StegoError::exit_code)
}
