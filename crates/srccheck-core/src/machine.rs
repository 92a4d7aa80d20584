//! 字节级状态机（行扫描器）
//!
//! 设计要点：
//! - 单遍、无回看：每个字节在当前状态下恰好被分类一次。
//! - 唯一的例外是“重入”：CR 后跟非 LF 时，当前字节需要在行首状态下再处理一次，
//!   但不会从输入源多读一个字节。
//!   实现上 `step` 返回 `Step::Reconsume`，由 `feed` 循环消化（一格回推）。
//! - 每类违规只在计数从 0 变 1 时生成一条 `Incident`，计数本身记录全部次数。
use std::io::{self, Read};

use serde::Serialize;
use thiserror::Error;

use crate::classify::ByteClass;
use crate::incident::{Category, Incident, IncidentCounts};

/// 读取分块大小
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// 扫描状态（任意时刻恰有一个处于激活）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// 行内，普通字符之后
    Normal,
    /// 行首（初始状态）
    BeginOfLine,
    /// 刚读到 CR
    AfterCr,
    /// 还需要 3 个 UTF-8 续字节
    Expect3Trailers,
    /// 还需要 2 个
    Expect2Trailers,
    /// 还需要 1 个
    Expect1Trailer,
}

/// 单步处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Consumed,
    /// 状态已切换，当前字节需在新状态下重新处理
    Reconsume,
}

/// 单个文件扫描结束后的汇总
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// 识别到的行结束符数量（LF、CR、CRLF 各算一次）
    pub lines: u64,
    pub counts: IncidentCounts,
    /// 按字节顺序排列，每类至多一条（缺少行尾换行符同样至多一条）
    pub incidents: Vec<Incident>,
}

/// 到达 EOF 之前读取失败；`partial` 保留失败前已扫描部分的汇总（含文件末尾判定）
#[derive(Error, Debug)]
#[error("{source}")]
pub struct ReadFailure {
    pub partial: ScanSummary,
    #[source]
    pub source: io::Error,
}

/// 行扫描器：状态 + 行计数 + 各类计数；每个文件使用一个全新实例
#[derive(Debug)]
pub struct LineScanner {
    state: State,
    lines: u64,
    counts: IncidentCounts,
    incidents: Vec<Incident>,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineScanner {
    pub fn new() -> Self {
        Self {
            state: State::BeginOfLine,
            lines: 0,
            counts: IncidentCounts::default(),
            incidents: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn counts(&self) -> &IncidentCounts {
        &self.counts
    }

    /// 消费一个字节；需要重入时在本地循环，不向输入源多取字节
    pub fn feed(&mut self, byte: u8) {
        let class = ByteClass::of(byte);
        while self.step(class) == Step::Reconsume {}
    }

    pub fn feed_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.feed(b);
        }
    }

    /// 输入结束：若不在行首，追加一次“缺少行尾换行符”
    pub fn finish(mut self) -> ScanSummary {
        if self.state != State::BeginOfLine {
            self.counts.missing_eol = 1;
            self.incidents.push(Incident::new(Category::MissingEol, self.lines + 1));
        }
        ScanSummary { lines: self.lines, counts: self.counts, incidents: self.incidents }
    }

    fn step(&mut self, class: ByteClass) -> Step {
        use ByteClass as B;
        use State as S;

        match (self.state, class) {
            // 行首与行内的处理完全一致，仅作为“是否缺少行尾换行符”的判据
            (S::BeginOfLine | S::Normal, B::Lf) => {
                self.lines += 1;
                self.state = S::BeginOfLine;
            }
            (S::BeginOfLine | S::Normal, B::Cr) => self.state = S::AfterCr,
            (S::BeginOfLine | S::Normal, B::Tab) => {
                self.incident(Category::Tab);
                self.state = S::Normal;
            }
            (S::BeginOfLine | S::Normal, B::Lead3) => self.state = S::Expect3Trailers,
            (S::BeginOfLine | S::Normal, B::Lead2) => self.state = S::Expect2Trailers,
            (S::BeginOfLine | S::Normal, B::Lead1) => self.state = S::Expect1Trailer,
            (S::BeginOfLine | S::Normal, B::Continuation) => {
                self.incident(Category::BadUtf8);
                self.state = S::Normal;
            }
            (S::BeginOfLine | S::Normal, B::Control) => {
                self.incident(Category::Control);
                self.state = S::Normal;
            }
            (S::BeginOfLine | S::Normal, B::Other) => self.state = S::Normal,

            (S::AfterCr, B::Lf) => {
                self.incident(Category::Crlf);
                self.lines += 1;
                self.state = S::BeginOfLine;
            }
            (S::AfterCr, _) => {
                self.incident(Category::BareCr);
                self.lines += 1;
                self.state = S::BeginOfLine;
                return Step::Reconsume;
            }

            (S::Expect3Trailers, B::Continuation) => self.state = S::Expect2Trailers,
            (S::Expect2Trailers, B::Continuation) => self.state = S::Expect1Trailer,
            (S::Expect1Trailer, B::Continuation) => self.state = S::Normal,
            // 打断序列的字节随之被消费，不再重新分类
            (S::Expect3Trailers | S::Expect2Trailers | S::Expect1Trailer, _) => {
                self.incident(Category::BadUtf8);
                self.state = S::Normal;
            }
        }
        Step::Consumed
    }

    fn incident(&mut self, category: Category) {
        if self.counts.record(category) {
            self.incidents.push(Incident::new(category, self.lines + 1));
        }
    }
}

/// 扫描内存中的字节缓冲
pub fn scan_bytes(bytes: &[u8]) -> ScanSummary {
    let mut scanner = LineScanner::new();
    scanner.feed_all(bytes);
    scanner.finish()
}

/// 分块读取任意输入源直到 EOF；读错误时连同已发现的违规一并返回
pub fn scan_reader<R: Read>(mut reader: R) -> Result<ScanSummary, ReadFailure> {
    let mut scanner = LineScanner::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(ReadFailure { partial: scanner.finish(), source }),
        };
        scanner.feed_all(&buf[..n]);
    }
    Ok(scanner.finish())
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
