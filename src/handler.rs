//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::Carrier;
use crate::cli::{CapacityArgs, DecodeArgs, EncodeArgs};
use crate::error::StegoError;
use crate::steganography::{capacity, decode, encode, max_payload_len, required_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 在 `source` 所在目录中生成 `<prefix>_<名称>.<extension>` 形式的默认输出路径。
fn default_output(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    source.with_file_name(format!("{prefix}_{stem}.{extension}"))
}

/// 输出文件已存在且未指定 `--force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn open_carrier(path: &Path) -> Result<Carrier> {
    Carrier::open(path).with_context(|| {
        format!(
            "Unable to load image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责读取载荷文件和载体图像、检查输出路径、调用嵌入引擎写入长度字段和载荷，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和种子的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载荷文件或载体图像。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_output(&args.image, "doctored", "png"));
    ensure_writable(&dest, args.force)?;

    let payload = fs::read(&args.payload)
        .map_err(StegoError::from)
        .with_context(|| {
            format!(
                "Unable to read payload file: {}",
                args.payload.to_string_lossy().red().bold()
            )
        })?;

    let mut carrier = open_carrier(&args.image)?;
    info!(
        "hiding {} bytes, capacity {} bits",
        payload.len(),
        capacity(&carrier.raster)
    );

    encode(&payload, &mut carrier.raster, args.seed).with_context(|| {
        format!(
            "Failed to hide {} in {}.",
            args.payload.to_string_lossy().red().bold(),
            args.image.to_string_lossy().red().bold()
        )
    })?;

    carrier.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been hidden ({} bits used) and saved: {}",
        payload.len().to_string().green(),
        required_bits(payload.len()).to_string().green(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、以相同的种子恢复载荷，最后将载荷写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和种子的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 读出的长度超过图像容量 (通常意味着种子错误或图像未隐藏数据)。
/// * 无法写入到目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.image, "recovered", "bin"));
    ensure_writable(&output, args.force)?;

    let carrier = open_carrier(&args.image)?;

    let payload = decode(&carrier.raster, args.seed).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain hidden data or the seed is wrong.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&output, &payload)
        .map_err(StegoError::from)
        .with_context(|| {
            format!(
                "Unable to write to target file: {}",
                output.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "{} bytes have been recovered and saved: {}",
        payload.len().to_string().green(),
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告可用比特数和最大载荷字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let carrier = open_carrier(&args.image)?;
    let raster = &carrier.raster;

    println!(
        "{}: {}x{} pixels, {} usable bits, up to {} payload bytes",
        args.image.to_string_lossy().bold(),
        raster.width(),
        raster.height(),
        capacity(raster).to_string().green(),
        max_payload_len(raster).to_string().green().bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_next_to_the_source() {
        assert_eq!(
            default_output(Path::new("/tmp/pics/cat.png"), "doctored", "png"),
            PathBuf::from("/tmp/pics/doctored_cat.png")
        );
        assert_eq!(
            default_output(Path::new("doctored_cat.png"), "recovered", "bin"),
            PathBuf::from("recovered_doctored_cat.bin")
        );
    }
}
