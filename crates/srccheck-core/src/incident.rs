//! 违规类别、单条违规与按类别计数
use serde::Serialize;

/// 违规类别（规则集固定，不可配置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tab,
    Crlf,
    BareCr,
    Control,
    BadUtf8,
    MissingEol,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tab,
        Category::Crlf,
        Category::BareCr,
        Category::Control,
        Category::BadUtf8,
        Category::MissingEol,
    ];

    /// 输出到报告中的固定描述文本
    pub fn message(self) -> &'static str {
        match self {
            Category::Tab => "Tab character",
            Category::Crlf => "Windows newline sequence (CR,LF)",
            Category::BareCr => "Old-time MacOS newline sequence (CR)",
            Category::Control => "Unexpected control character",
            Category::BadUtf8 => "Bad multibyte sequence",
            Category::MissingEol => "Missing EOL at end of file",
        }
    }
}

/// 一条被报告的违规（仅每类首次出现才会生成）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub category: Category,
    /// 1 起始行号（行计数 + 1）
    pub line: u64,
    pub message: &'static str,
}

impl Incident {
    pub fn new(category: Category, line: u64) -> Self {
        Self { category, line, message: category.message() }
    }
}

/// 各类别的累计次数（单文件内单调不减，不跨文件共享）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncidentCounts {
    pub tab: u64,
    pub crlf: u64,
    pub bare_cr: u64,
    pub control: u64,
    pub bad_utf8: u64,
    pub missing_eol: u64,
}

impl IncidentCounts {
    /// 计数 +1；返回 true 表示该类别刚从 0 变为 1（即首次出现，需要报告）
    pub fn record(&mut self, category: Category) -> bool {
        let slot = self.slot_mut(category);
        *slot += 1;
        *slot == 1
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Tab => self.tab,
            Category::Crlf => self.crlf,
            Category::BareCr => self.bare_cr,
            Category::Control => self.control,
            Category::BadUtf8 => self.bad_utf8,
            Category::MissingEol => self.missing_eol,
        }
    }

    pub fn total(&self) -> u64 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    fn slot_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::Tab => &mut self.tab,
            Category::Crlf => &mut self.crlf,
            Category::BareCr => &mut self.bare_cr,
            Category::Control => &mut self.control,
            Category::BadUtf8 => &mut self.bad_utf8,
            Category::MissingEol => &mut self.missing_eol,
        }
    }
}

#[cfg(test)]
#[path = "incident_tests.rs"]
mod tests;
