use clap::Parser;
use colored::Colorize;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::process::ExitCode;

use lsb_scatter::{
    cli::{Cli, Commands},
    error::exit_code_for,
    handler::{handle_capacity, handle_decode, handle_encode},
};

/// 根据 `-v` 的次数初始化日志，`RUST_LOG` 优先。
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令将执行分派到相应的处理函数。
/// 出错时按错误类别返回不同的退出码。
fn main() -> ExitCode {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // 根据子命令调用相应的处理函数
    let result = match cli.command {
        Commands::Encode(args) => handle_encode(args),
        Commands::Decode(args) => handle_decode(args),
        Commands::Capacity(args) => handle_capacity(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}
