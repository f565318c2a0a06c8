//! # 栅格缓冲区模块
//!
//! `RasterBuffer` 按行保存交错的 RGBA 通道值，每行 `width * 4` 个通道。
//! 编码时以 `&mut` 借用并原地修改，解码时以 `&` 借用只读访问。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::coordinates::Coordinate;
use crate::error::StegoError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl RasterBuffer {
    /// 创建一个所有通道均为 0 的栅格。
    ///
    /// # Errors
    ///
    /// 宽度或高度为 0，或每行通道数溢出 `u32` 时返回 `MalformedCarrier`。
    pub fn new(width: u32, height: u32) -> Result<Self, StegoError> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            channels: vec![0; len],
        })
    }

    /// 从按行排列的 RGBA 通道数据构造栅格。
    ///
    /// # Errors
    ///
    /// 尺寸退化或 `channels` 的长度不等于 `width * height * 4` 时返回 `MalformedCarrier`。
    pub fn from_raw(width: u32, height: u32, channels: Vec<u8>) -> Result<Self, StegoError> {
        let len = Self::checked_len(width, height)?;
        if channels.len() != len {
            return Err(StegoError::malformed(format!(
                "expected {len} channel values for a {width}x{height} RGBA raster, got {}",
                channels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize, StegoError> {
        if width == 0 || height == 0 {
            return Err(StegoError::malformed(format!(
                "degenerate dimensions {width}x{height}"
            )));
        }
        let per_row = width
            .checked_mul(CHANNELS_PER_PIXEL as u32)
            .ok_or_else(|| StegoError::malformed(format!("width {width} is too large")))?;
        (per_row as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| StegoError::malformed(format!("{width}x{height} is too large")))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 每行的通道数，即 `width * 4`。
    pub fn channels_per_row(&self) -> u32 {
        self.width * CHANNELS_PER_PIXEL as u32
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.channels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.channels
    }

    fn index(&self, coord: Coordinate) -> usize {
        coord.row * self.channels_per_row() as usize + coord.channel
    }

    /// 读取坐标处的通道值。坐标必须位于栅格内。
    pub fn get(&self, coord: Coordinate) -> u8 {
        self.channels[self.index(coord)]
    }

    /// 读取坐标处通道值的最低有效位。
    pub fn lsb(&self, coord: Coordinate) -> u8 {
        self.get(coord) & 0x1
    }

    /// 将坐标处通道值的最低有效位替换为 `bit`，高 7 位保持不变。
    pub fn set_lsb(&mut self, coord: Coordinate, bit: u8) {
        let idx = self.index(coord);
        self.channels[idx] = (self.channels[idx] & 0xFE) | (bit & 0x1);
    }
}
