//! 编解码错误类型定义。
//!
//! # 教案定位（Why）
//! - 所有错误同步检测、以数据形式返回（kind + 可读信息），不使用 panic 或
//!   进程终止；宿主适配层自行决定是否把错误文本上报到日志通道。
//! - 与编解码逻辑解耦成独立模块，变体字段携带定位所需的上下文
//!   （字段名、偏移、长度），便于测试直接断言具体错误。
//!
//! # 契约说明（What）
//! - 任一错误都表示本次 encode/decode 失败；已产生的部分输出（编码侧的
//!   前缀字节）必须视为无效。
//! - 所有变体实现 `Clone`/`PartialEq`，`Display` 输出人类可读描述；
//!   `std` feature 下额外接入 `std::error::Error`。

use core::fmt;

/// 编码过程的错误分类。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// 值的类型不在受支持的变体集合内。
    ///
    /// `Value` 本身是封闭枚举，编码器对其穷尽匹配；该分支保留给宿主
    /// 适配层：当宿主动态类型无法映射到任何 `Value` 变体时，以此错误
    /// 统一上报。
    UnsupportedType {
        /// 无法编码的类型名称。
        kind: &'static str,
    },
    /// 字符串/二进制长度或容器元素数量超出线格式上限（`2^32 - 1`）。
    SizeOutOfRange {
        /// 超限对象的类型名称（"string"/"binary"/"array"/"map"）。
        what: &'static str,
        /// 实际长度或元素数量。
        len: usize,
    },
    /// 值的嵌套层数超过递归防护上限。
    DepthLimitExceeded {
        /// 生效的最大嵌套深度。
        max_depth: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { kind } => {
                write!(f, "不支持的数据类型：{kind}")
            }
            Self::SizeOutOfRange { what, len } => {
                write!(f, "{what} 长度 {len} 超出线格式可表示范围")
            }
            Self::DepthLimitExceeded { max_depth } => {
                write!(f, "值嵌套深度超过上限 {max_depth}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// 解码过程的错误分类。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// 需要读取下一个 format tag 时输入已经耗尽。
    UnexpectedEndOfInput,
    /// 剩余字节不足以读出指定字段。
    NotEnoughBuffer {
        /// 正在读取的字段名称。
        field: &'static str,
        /// 该字段需要的字节数。
        needed: usize,
        /// 当前剩余的字节数。
        remaining: usize,
    },
    /// 首字节不是任何受支持的 format tag（保留值 `0xc1` 或 ext 家族）。
    InvalidTag {
        /// 实际读到的字节。
        tag: u8,
        /// 该字节在输入中的偏移。
        offset: usize,
    },
    /// uint 64 载荷超出 `i64` 可表示范围。
    IntegerOutOfRange {
        /// 线上的原始无符号取值。
        value: u64,
    },
    /// str 载荷不是合法的 UTF-8 序列。
    InvalidUtf8 {
        /// 载荷起始字节在输入中的偏移。
        offset: usize,
    },
    /// 线上数据的嵌套层数超过递归防护上限。
    DepthLimitExceeded {
        /// 生效的最大嵌套深度。
        max_depth: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEndOfInput => f.write_str("输入在读取 format tag 前已耗尽"),
            Self::NotEnoughBuffer {
                field,
                needed,
                remaining,
            } => {
                write!(f, "读取 {field} 需要 {needed} 字节，仅剩 {remaining} 字节")
            }
            Self::InvalidTag { tag, offset } => {
                write!(f, "偏移 {offset} 处出现非法 format tag 0x{tag:02x}")
            }
            Self::IntegerOutOfRange { value } => {
                write!(f, "uint 64 取值 {value} 超出 64-bit 有符号整数范围")
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "偏移 {offset} 处的 str 载荷不是合法 UTF-8")
            }
            Self::DepthLimitExceeded { max_depth } => {
                write!(f, "线上数据嵌套深度超过上限 {max_depth}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
