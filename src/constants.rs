/// 未指定种子时使用的默认种子。
/// 编码与解码必须使用相同的默认值，否则两端生成的坐标序列不一致。
pub const DEFAULT_SEED: u64 = 1337;

/// 长度字段占用的比特数。
/// 长度字段记录的是载荷的字节数 (而非比特数)，低位在前。
pub const LENGTH_FIELD_BITS: usize = 32;

/// 每个字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 栅格中每个像素的通道数。
/// 载体图像总是被展开为 RGBA，因此每行的通道数为 `width * 4`。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 每个像素中允许写入的通道偏移 (RGBA 中的 G 通道)。
/// 只有满足 `channel % CHANNELS_PER_PIXEL == ELIGIBLE_CHANNEL` 的坐标才会被选中。
pub const ELIGIBLE_CHANNEL: usize = 1;
