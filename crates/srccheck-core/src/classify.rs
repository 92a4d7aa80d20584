//! 单字节分类（纯函数，无状态）
//!
//! 所有掩码与区间判断都基于 `u8`，不会出现有符号字节的符号扩展问题。

/// UTF-8 续字节：10xx xxxx
#[inline]
pub fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// 2 字节序列的首字节：110x xxxx（后随 1 个续字节）
#[inline]
pub fn is_lead_byte_1(b: u8) -> bool {
    b & 0xE0 == 0xC0
}

/// 3 字节序列的首字节：1110 xxxx（后随 2 个续字节）
#[inline]
pub fn is_lead_byte_2(b: u8) -> bool {
    b & 0xF0 == 0xE0
}

/// 4 字节序列的首字节：1111 0xxx（后随 3 个续字节）
#[inline]
pub fn is_lead_byte_3(b: u8) -> bool {
    b & 0xF8 == 0xF0
}

/// C0 控制字符（0x00..0x1F），不含 `\t` `\n` `\r`
#[inline]
pub fn is_c0_control(b: u8) -> bool {
    b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')
}

/// 字节类别，状态机按 (状态, 类别) 做分派
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    Lf,
    Cr,
    Tab,
    /// 4 字节序列首字节
    Lead3,
    /// 3 字节序列首字节
    Lead2,
    /// 2 字节序列首字节
    Lead1,
    Continuation,
    Control,
    /// 普通 ASCII 以及 0xF8..=0xFF 这类无法归类的高位字节
    Other,
}

impl ByteClass {
    /// 判定顺序：换行/回车/制表 → 首字节(3/2/1) → 续字节 → C0 控制 → 其他
    pub fn of(b: u8) -> Self {
        match b {
            b'\n' => ByteClass::Lf,
            b'\r' => ByteClass::Cr,
            b'\t' => ByteClass::Tab,
            _ if is_lead_byte_3(b) => ByteClass::Lead3,
            _ if is_lead_byte_2(b) => ByteClass::Lead2,
            _ if is_lead_byte_1(b) => ByteClass::Lead1,
            _ if is_continuation_byte(b) => ByteClass::Continuation,
            _ if is_c0_control(b) => ByteClass::Control,
            _ => ByteClass::Other,
        }
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
