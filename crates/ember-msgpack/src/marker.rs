//! MessagePack 格式标记表。
//!
//! # 教案定位（Why）
//! - 编码器与解码器共享同一份 tag 常量，避免两侧对同一字节值出现不一致的魔法数字。
//! - 常量按 MessagePack 规范的 tag 空间分组排列，便于与协议文档逐行对照。
//!
//! # 契约说明（What）
//! - 多字节字段一律大端序，常量本身只覆盖首字节（format tag）。
//! - `0xc1` 为规范保留值，`ext` 家族（`0xc7`-`0xc9`、`0xd4`-`0xd8`）不在本
//!   编解码器的支持范围内；解码遇到它们时返回 `InvalidTag`。

/// Nil。
pub const NIL: u8 = 0xc0;
/// 规范保留、永不使用的 tag；解码时视为非法输入。
pub const RESERVED: u8 = 0xc1;
/// Bool false。
pub const FALSE: u8 = 0xc2;
/// Bool true。
pub const TRUE: u8 = 0xc3;

/// bin 8，长度字段 1 字节。
pub const BIN8: u8 = 0xc4;
/// bin 16，长度字段 2 字节。
pub const BIN16: u8 = 0xc5;
/// bin 32，长度字段 4 字节。
pub const BIN32: u8 = 0xc6;

/// float 32，负载为 IEEE-754 单精度。
pub const FLOAT32: u8 = 0xca;
/// float 64，负载为 IEEE-754 双精度；仅解码路径接受。
pub const FLOAT64: u8 = 0xcb;

/// uint 8。编码路径只使用有符号家族，解码需要同时接受无符号 tag。
pub const UINT8: u8 = 0xcc;
/// uint 16。
pub const UINT16: u8 = 0xcd;
/// uint 32。
pub const UINT32: u8 = 0xce;
/// uint 64。超出 `i64` 可表示范围的取值会在解码时报错。
pub const UINT64: u8 = 0xcf;

/// int 8。
pub const INT8: u8 = 0xd0;
/// int 16。
pub const INT16: u8 = 0xd1;
/// int 32。
pub const INT32: u8 = 0xd2;
/// int 64。
pub const INT64: u8 = 0xd3;

/// str 8，长度字段 1 字节。
pub const STR8: u8 = 0xd9;
/// str 16，长度字段 2 字节。
pub const STR16: u8 = 0xda;
/// str 32，长度字段 4 字节。
pub const STR32: u8 = 0xdb;

/// array 16，元素计数字段 2 字节。
pub const ARRAY16: u8 = 0xdc;
/// array 32，元素计数字段 4 字节。
pub const ARRAY32: u8 = 0xdd;

/// map 16，键值对计数字段 2 字节。
pub const MAP16: u8 = 0xde;
/// map 32，键值对计数字段 4 字节。
pub const MAP32: u8 = 0xdf;

/// fixmap 基值：`0x80 | n`，n 为键值对数量（0-15）。
pub const FIXMAP_BASE: u8 = 0x80;
/// fixarray 基值：`0x90 | n`，n 为元素数量（0-15）。
pub const FIXARRAY_BASE: u8 = 0x90;
/// fixstr 基值：`0xa0 | len`，len 为字节长度（0-31）。
pub const FIXSTR_BASE: u8 = 0xa0;

/// fixstr 可承载的最大字节长度。
pub const FIXSTR_MAX_LEN: usize = 31;
/// fixarray/fixmap 可承载的最大元素（键值对）数量。
pub const FIX_CONTAINER_MAX: usize = 15;

/// positive fixint 的上界（含）。
pub const POS_FIXINT_MAX: i64 = 0x7f;
/// negative fixint 的下界（含），对应 tag 空间 `0xe0`-`0xff`。
pub const NEG_FIXINT_MIN: i64 = -32;
