//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_SEED;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于种子随机散布 LSB 隐写术的命令行工具，用于在无损格式图像 (如 PNG) 中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于种子随机散布 LSB 隐写术的命令行工具。载荷的每个比特被写入由种子决定的像素 G 通道的最低有效位，编码与解码必须使用相同的种子。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏)、decode (恢复) 和 capacity (容量查询)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将任意文件隐藏到无损格式图像中。
    #[command(alias = "e")]
    Encode(EncodeArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    #[command(alias = "d")]
    Decode(DecodeArgs),

    /// 显示图像最多能隐藏多少数据。
    Capacity(CapacityArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 决定像素选择顺序的种子。
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复数据的输出路径，默认为图像旁的 `recovered_<名称>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 编码时使用的种子。
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
