use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use srccheck_core::{check_and_write, CheckOptions, OutputFormat};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(
    name = "srccheck",
    version,
    about = "Check source files for tabs, CR/CRLF line endings, control characters and malformed UTF-8"
)]
struct Cli {
    /// 待检查的文件（按参数顺序逐个检查）
    paths: Vec<PathBuf>,

    /// 线程数（"auto"=CPU 核心数；默认 1 即串行）
    #[arg(long, default_value = "1")]
    threads: String,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// 将目录参数递归展开为其中的文件
    #[arg(long, short = 'r')]
    recursive: bool,

    /// 遇到首个无法读取的文件即停止
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let opts = CheckOptions {
        threads: parse_threads(&cli.threads),
        format: cli.format.into(),
        recursive: cli.recursive,
        fail_fast: cli.fail_fast,
    };
    info!(paths = cli.paths.len(), ?opts, "starting");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = io::stderr();
    let stats = check_and_write(&cli.paths, &mut out, &mut err, &opts).context("check failed")?;

    info!(files_checked = stats.files_checked, files_failed = stats.files_failed, "done");

    // 退出码只反映“能否完成检查”，不反映文件是否干净
    Ok(if stats.success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留检查报告；默认 warn
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数：非法值回退为串行
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => Some(1),
    }
}
