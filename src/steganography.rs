//! # 嵌入引擎模块
//!
//! 驱动坐标生成器和比特编解码，将带长度前缀的载荷写入栅格 (`encode`)，
//! 或从栅格中读回 (`decode`)。两者必须以相同的顺序请求坐标：
//! 先 32 个长度比特，再逐个载荷比特。

use crate::bits::{bits_to_bytes, bits_to_int, bytes_to_bits, int32_to_bits};
use crate::constants::{BITS_PER_BYTE, LENGTH_FIELD_BITS};
use crate::coordinates::{Coordinate, CoordinateGenerator, eligible_per_row};
use crate::error::StegoError;
use crate::raster::RasterBuffer;
use log::debug;

/// 栅格中可用坐标的总数，即最多可以写入的比特数。
pub fn capacity(raster: &RasterBuffer) -> usize {
    raster.height() as usize * eligible_per_row(raster.channels_per_row())
}

/// 嵌入 `payload_len` 字节的载荷所需的比特数 (含长度字段)。
pub fn required_bits(payload_len: usize) -> usize {
    payload_len
        .saturating_mul(BITS_PER_BYTE)
        .saturating_add(LENGTH_FIELD_BITS)
}

/// 栅格能容纳的最大载荷字节数。
pub fn max_payload_len(raster: &RasterBuffer) -> usize {
    capacity(raster).saturating_sub(LENGTH_FIELD_BITS) / BITS_PER_BYTE
}

fn ensure_capacity(required: usize, available: usize) -> Result<(), StegoError> {
    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }
    Ok(())
}

fn coordinates_for(raster: &RasterBuffer, seed: u64) -> CoordinateGenerator {
    CoordinateGenerator::new(raster.height(), raster.channels_per_row(), seed)
}

fn next_coordinate(coords: &mut CoordinateGenerator) -> Result<Coordinate, StegoError> {
    coords.next().ok_or(StegoError::CapacityExceeded {
        required: coords.capacity() + 1,
        available: coords.capacity(),
    })
}

fn write_bits(
    raster: &mut RasterBuffer,
    coords: &mut CoordinateGenerator,
    bits: &[u8],
) -> Result<(), StegoError> {
    for &bit in bits {
        let coord = next_coordinate(coords)?;
        raster.set_lsb(coord, bit);
    }
    Ok(())
}

fn read_bits(
    raster: &RasterBuffer,
    coords: &mut CoordinateGenerator,
    count: usize,
) -> Result<Vec<u8>, StegoError> {
    (0..count)
        .map(|_| next_coordinate(coords).map(|coord| raster.lsb(coord)))
        .collect()
}

/// 将 `payload` 隐藏到 `raster` 中。
///
/// 先写入 32 比特的字节数，再按顺序写入载荷比特，每个比特占用一个坐标，
/// 只修改该通道的最低有效位。
///
/// # Errors
///
/// * `PayloadTooLarge`: 字节数无法用 32 位表示。
/// * `CapacityExceeded`: 所需比特数超过栅格容量。此时栅格不会被修改。
pub fn encode(payload: &[u8], raster: &mut RasterBuffer, seed: u64) -> Result<(), StegoError> {
    let byte_count = u32::try_from(payload.len())
        .map_err(|_| StegoError::PayloadTooLarge { len: payload.len() })?;

    let required = required_bits(payload.len());
    let available = capacity(raster);
    ensure_capacity(required, available)?;

    let bits = bytes_to_bits(payload);
    let size_field = int32_to_bits(u64::from(byte_count));
    debug!(
        "embedding {} bytes ({required} of {available} bits) with seed {seed}",
        byte_count
    );

    let mut coords = coordinates_for(raster, seed);
    write_bits(raster, &mut coords, &size_field)?;
    write_bits(raster, &mut coords, &bits)?;

    Ok(())
}

/// 从 `raster` 中恢复载荷。
///
/// 没有完整性校验：种子错误或图像从未嵌入过数据时，
/// 读出的长度要么超出容量 (返回 `CapacityExceeded`)，要么得到无意义的字节。
///
/// # Errors
///
/// 长度字段或其声明的载荷超过栅格容量时返回 `CapacityExceeded`。
pub fn decode(raster: &RasterBuffer, seed: u64) -> Result<Vec<u8>, StegoError> {
    let available = capacity(raster);
    ensure_capacity(LENGTH_FIELD_BITS, available)?;

    let mut coords = coordinates_for(raster, seed);
    let byte_count = bits_to_int(&read_bits(raster, &mut coords, LENGTH_FIELD_BITS)?) as usize;
    debug!("length field announces {byte_count} bytes (seed {seed})");

    ensure_capacity(required_bits(byte_count), available)?;
    let bits = read_bits(raster, &mut coords, byte_count * BITS_PER_BYTE)?;

    Ok(bits_to_bytes(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SEED;
    use rand::RngCore;

    fn noisy_raster(width: u32, height: u32) -> RasterBuffer {
        let mut channels = vec![0u8; (width * height * 4) as usize];
        rand::rng().fill_bytes(&mut channels);
        RasterBuffer::from_raw(width, height, channels).unwrap()
    }

    #[test]
    fn small_carrier_is_rejected() {
        // 10 行 × 8 通道：20 个可用坐标，而 2 字节载荷需要 48 比特
        let mut raster = RasterBuffer::new(2, 10).unwrap();
        assert_eq!(capacity(&raster), 20);

        let err = encode(&[0x41, 0x42], &mut raster, DEFAULT_SEED).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 48,
                available: 20
            }
        ));
        assert!(raster.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn single_byte_round_trips() {
        // 100 行 × 400 通道：10000 个可用坐标
        let mut raster = noisy_raster(100, 100);
        assert_eq!(capacity(&raster), 10_000);

        encode(&[0x01], &mut raster, DEFAULT_SEED).unwrap();
        assert_eq!(decode(&raster, DEFAULT_SEED).unwrap(), vec![0x01]);
    }

    #[test]
    fn round_trips_various_payloads() {
        let mut payload = vec![0u8; 600];
        rand::rng().fill_bytes(&mut payload);

        for (len, seed) in [(0, 0), (1, 7), (17, DEFAULT_SEED), (600, u64::MAX)] {
            let mut raster = noisy_raster(64, 80);
            encode(&payload[..len], &mut raster, seed).unwrap();
            assert_eq!(decode(&raster, seed).unwrap(), &payload[..len]);
        }
    }

    #[test]
    fn fills_capacity_exactly() {
        // 4 像素宽 × 10 行：40 个可用坐标，恰好容纳 32 + 8 比特
        let mut raster = noisy_raster(4, 10);
        assert_eq!(max_payload_len(&raster), 1);

        encode(b"Z", &mut raster, 3).unwrap();
        assert_eq!(decode(&raster, 3).unwrap(), b"Z");

        let err = encode(b"ZZ", &mut raster, 3).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 48,
                available: 40
            }
        ));
    }

    #[test]
    fn only_green_lsbs_change() {
        let original = noisy_raster(32, 32);
        let mut raster = original.clone();
        encode(b"hidden in plain sight", &mut raster, DEFAULT_SEED).unwrap();

        let per_row = raster.channels_per_row() as usize;
        for (i, (&before, &after)) in original.as_raw().iter().zip(raster.as_raw()).enumerate() {
            if (i % per_row) % 4 != 1 {
                assert_eq!(before, after, "channel {i} is not eligible");
            }
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn blank_carrier_decodes_to_nothing() {
        let raster = RasterBuffer::new(16, 16).unwrap();
        assert!(decode(&raster, DEFAULT_SEED).unwrap().is_empty());
    }

    #[test]
    fn garbage_length_is_reported() {
        let raster = RasterBuffer::from_raw(16, 16, vec![0xFF; 16 * 16 * 4]).unwrap();
        assert!(matches!(
            decode(&raster, DEFAULT_SEED),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn carrier_too_small_for_length_field() {
        let raster = RasterBuffer::new(3, 10).unwrap();
        assert!(matches!(
            decode(&raster, DEFAULT_SEED),
            Err(StegoError::CapacityExceeded {
                required: 32,
                available: 30
            })
        ));
    }
}
