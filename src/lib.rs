//! # lsb_scatter 库
//!
//! 本库包含种子随机散布 LSB 隐写工具的核心逻辑：
//! 比特编解码、坐标生成、嵌入引擎以及载体图像适配。

// 声明库包含的所有模块。

pub mod bits;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod coordinates;
pub mod error;
pub mod handler;
pub mod raster;
pub mod steganography;

pub use error::StegoError;
