//! Value → MessagePack 字节序列的编码路径。
//!
//! # 教案定位（Why）
//! - 对每个值挑选能容纳它的最紧凑线表示（fix 族优先，其次按 8/16/32/64 位
//!   逐级放宽），复合值按插入顺序递归展开。
//! - 错误沿递归栈立即上抛：首个子错误出现后不再为后续兄弟节点产出任何
//!   字节，调用方须将已写入的前缀视为无效。
//!
//! # 契约说明（What）
//! - 整数只使用有符号 tag 家族，宽度按严格的有符号区间包含关系选择。
//! - 浮点一律收窄为 IEEE-754 单精度发出；双精度输入的多余精度在此丢失。
//! - 字符串/二进制长度与容器元素数的上限为 `2^32 - 1`，超出返回
//!   [`EncodeError::SizeOutOfRange`]。
//!
//! # 实现策略（How）
//! - 输出缓冲为 `Vec<u8>`，所有写入均为尾部追加；多字节字段经
//!   `to_be_bytes` 保证大端序。
//! - 递归深度以 [`DEFAULT_MAX_DEPTH`] 为上限，防止适配层传入病态深嵌套值
//!   时耗尽栈空间。

use alloc::vec::Vec;

use crate::DEFAULT_MAX_DEPTH;
use crate::error::EncodeError;
use crate::marker;
use crate::value::Value;

/// 将单个顶层值编码为新分配的字节缓冲。
///
/// # 调用契约
/// - **输入**：任意 [`Value`]；编码器只读访问，不做修改。
/// - **返回值**：成功时为完整的 MessagePack 字节序列；失败时丢弃已产出的
///   部分前缀，仅返回 [`EncodeError`]。
/// - **后置条件**：成功产出的字节可被 [`crate::decode()`] 还原为相等的值
///   （浮点按单精度收窄后比较）。
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// 将单个顶层值追加编码到调用方提供的缓冲。
///
/// # 调用契约
/// - 出错时 `out` 中保留错误发生前已写入的前缀字节；该前缀不是合法的
///   完整报文，调用方必须整体丢弃或截断回写入前的长度。
pub fn encode_into(value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    encode_value(value, out, 0)
}

/// 递归编码单个节点。`depth` 为当前节点在值树中的深度，顶层为 0。
fn encode_value(value: &Value, out: &mut Vec<u8>, depth: usize) -> Result<(), EncodeError> {
    if depth >= DEFAULT_MAX_DEPTH {
        return Err(EncodeError::DepthLimitExceeded {
            max_depth: DEFAULT_MAX_DEPTH,
        });
    }

    match value {
        Value::Nil => {
            out.push(marker::NIL);
            Ok(())
        }
        Value::Bool(v) => {
            out.push(if *v { marker::TRUE } else { marker::FALSE });
            Ok(())
        }
        Value::Integer(v) => {
            encode_integer(*v, out);
            Ok(())
        }
        Value::Float(v) => {
            out.push(marker::FLOAT32);
            out.extend_from_slice(&(*v as f32).to_be_bytes());
            Ok(())
        }
        Value::String(v) => {
            write_str_header(out, v.len())?;
            out.extend_from_slice(v.as_bytes());
            Ok(())
        }
        Value::Binary(v) => {
            write_bin_header(out, v.len())?;
            out.extend_from_slice(v);
            Ok(())
        }
        Value::Array(items) => {
            write_array_header(out, items.len())?;
            for item in items {
                encode_value(item, out, depth + 1)?;
            }
            Ok(())
        }
        Value::Map(pairs) => {
            write_map_header(out, pairs.len())?;
            for (key, val) in pairs {
                encode_value(key, out, depth + 1)?;
                encode_value(val, out, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// 整数宽度选择：fixint 优先，其余按严格的有符号区间包含关系取最窄 tag。
fn encode_integer(value: i64, out: &mut Vec<u8>) {
    if (marker::NEG_FIXINT_MIN..=marker::POS_FIXINT_MAX).contains(&value) {
        // positive fixint 与 negative fixint 共用同一条截断路径：
        // [-32, 127] 内的补码低 8 位恰好就是目标 tag 字节。
        out.push(value as u8);
    } else if let Ok(v) = i8::try_from(value) {
        out.push(marker::INT8);
        out.push(v as u8);
    } else if let Ok(v) = i16::try_from(value) {
        out.push(marker::INT16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = i32::try_from(value) {
        out.push(marker::INT32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push(marker::INT64);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// 写入字符串长度头：fixstr / str 8 / str 16 / str 32。
fn write_str_header(out: &mut Vec<u8>, len: usize) -> Result<(), EncodeError> {
    if len <= marker::FIXSTR_MAX_LEN {
        out.push(marker::FIXSTR_BASE | len as u8);
    } else if let Ok(v) = u8::try_from(len) {
        out.push(marker::STR8);
        out.push(v);
    } else if let Ok(v) = u16::try_from(len) {
        out.push(marker::STR16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(len) {
        out.push(marker::STR32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        return Err(EncodeError::SizeOutOfRange {
            what: "string",
            len,
        });
    }
    Ok(())
}

/// 写入二进制长度头：bin 8 / bin 16 / bin 32，无 fix 形式。
fn write_bin_header(out: &mut Vec<u8>, len: usize) -> Result<(), EncodeError> {
    if let Ok(v) = u8::try_from(len) {
        out.push(marker::BIN8);
        out.push(v);
    } else if let Ok(v) = u16::try_from(len) {
        out.push(marker::BIN16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(len) {
        out.push(marker::BIN32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        return Err(EncodeError::SizeOutOfRange {
            what: "binary",
            len,
        });
    }
    Ok(())
}

/// 写入数组元素计数头：fixarray / array 16 / array 32。
fn write_array_header(out: &mut Vec<u8>, count: usize) -> Result<(), EncodeError> {
    if count <= marker::FIX_CONTAINER_MAX {
        out.push(marker::FIXARRAY_BASE | count as u8);
    } else if let Ok(v) = u16::try_from(count) {
        out.push(marker::ARRAY16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(count) {
        out.push(marker::ARRAY32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        return Err(EncodeError::SizeOutOfRange {
            what: "array",
            len: count,
        });
    }
    Ok(())
}

/// 写入 map 键值对计数头：fixmap / map 16 / map 32。
fn write_map_header(out: &mut Vec<u8>, count: usize) -> Result<(), EncodeError> {
    if count <= marker::FIX_CONTAINER_MAX {
        out.push(marker::FIXMAP_BASE | count as u8);
    } else if let Ok(v) = u16::try_from(count) {
        out.push(marker::MAP16);
        out.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = u32::try_from(count) {
        out.push(marker::MAP32);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        return Err(EncodeError::SizeOutOfRange {
            what: "map",
            len: count,
        });
    }
    Ok(())
}
