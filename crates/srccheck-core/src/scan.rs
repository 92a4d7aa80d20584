//! 检查主流程与并行调度
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{CheckError, Result};
use crate::options::{CheckOptions, CheckStats};
use crate::output::ReportWriter;
use crate::report::{check_file, FileReport};

/// 待检查目标：路径，或在展开阶段就已失败的路径
type Target = std::result::Result<PathBuf, (PathBuf, CheckError)>;

/// 依参数顺序检查所有路径，并把报告写入 `out` / `err`
/// 稳定性保证：
/// - 输出顺序始终与参数顺序一致（并行时由 writer 按 idx 重排）
/// - 每个文件独立扫描，状态与计数不跨文件共享
///
/// 返回的错误只来自输出或调度；单个文件的 I/O 失败记录在 `CheckStats::files_failed`。
pub fn check_and_write(
    paths: &[PathBuf],
    out: &mut dyn Write,
    err: &mut dyn Write,
    opts: &CheckOptions,
) -> Result<CheckStats> {
    let targets = expand_targets(paths, opts.recursive);
    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    let mut writer = ReportWriter::new(out, err, opts.format);
    let mut stats = CheckStats::default();

    info!(targets = targets.len(), threads, "starting check");
    writer.begin()?;

    // 决策：fail-fast 需要严格的“遇错即停”，只能串行；单文件时并行也无意义
    if !opts.fail_fast && threads > 1 && targets.len() > 1 {
        check_parallel(targets, &mut writer, &mut stats, threads)?;
    } else {
        for target in targets {
            let report = check_target(target);
            stats.add(&report);
            writer.write(&report)?;
            if opts.fail_fast && !report.passed() {
                debug!(path = ?report.path, "stopping after first failure");
                break;
            }
        }
    }

    writer.end()?;
    info!(
        files_checked = stats.files_checked,
        files_failed = stats.files_failed,
        incidents = stats.incidents_total,
        "check finished"
    );
    Ok(stats)
}

fn check_target(target: Target) -> FileReport {
    match target {
        Ok(path) => check_file(&path),
        Err((path, e)) => FileReport::failed(path, e),
    }
}

/// 展开参数：非递归模式原样保留；递归模式下目录展开为其中的普通文件（按路径排序）
fn expand_targets(paths: &[PathBuf], recursive: bool) -> Vec<Target> {
    let mut targets = Vec::with_capacity(paths.len());
    for path in paths {
        if recursive && path.is_dir() {
            walk_dir(path, &mut targets);
        } else {
            targets.push(Ok(path.clone()));
        }
    }
    targets
}

fn walk_dir(root: &Path, targets: &mut Vec<Target>) {
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(e) => {
                if e.file_type().is_file() {
                    targets.push(Ok(e.into_path()));
                }
            }
            Err(source) => {
                let path = source.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                targets.push(Err((path.clone(), CheckError::Walk { path, source })));
            }
        }
    }
}

/// 并行调度：
/// - 建索引后使用 Rayon 线程池并行扫描
/// - 单线程 Writer 按 idx 重排并流式输出，保证稳定顺序
fn check_parallel(
    targets: Vec<Target>,
    writer: &mut ReportWriter<'_>,
    stats: &mut CheckStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    type Msg = (usize /*idx*/, FileReport);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let expected = targets.len();
    let indexed: Vec<(usize, Target)> = targets.into_iter().enumerate().collect();

    // Writer 保持在当前线程；扫描在后台线程内的 Rayon 线程池执行
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            indexed.into_par_iter().for_each_with(tx, |tx, (idx, target)| {
                let _ = tx.send((idx, check_target(target)));
            });
        });
        // 结束后 Sender 全部被丢弃，Receiver 将收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut pending: BTreeMap<usize, FileReport> = BTreeMap::new();

    while let Ok((idx, report)) = rx.recv() {
        pending.insert(idx, report);
        // 从 next_idx 开始顺序冲刷
        while let Some(report) = pending.remove(&next_idx) {
            stats.add(&report);
            writer.write(&report)?;
            next_idx += 1;
        }
    }

    // 线程 panic 时 Sender 随之丢弃，接收循环提前结束，这里必须视为失败
    worker_outcome(scan_thread.join(), next_idx, expected)
}

fn worker_outcome(joined: std::thread::Result<()>, written: usize, expected: usize) -> Result<()> {
    if joined.is_err() || written != expected {
        return Err(CheckError::Worker { written, expected });
    }
    Ok(())
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
