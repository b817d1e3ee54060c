//! MessagePack 字节序列 → Value 的解码路径。
//!
//! # 教案定位（Why）
//! - 对输入缓冲维持单调前进的读游标，依首字节（format tag）一次性确定该
//!   节点的剩余语法，纯递归下降、无回溯。
//! - 任何多字节读取之前都先校验剩余长度；校验失败立即携带字段名上抛
//!   [`DecodeError::NotEnoughBuffer`]，终止整棵值树的解码。
//!
//! # 契约说明（What）
//! - 解码器接受比编码器更宽的线格式：无符号整数 tag、float 64、以及
//!   非最小宽度的长度类都会被正常还原。
//! - map 按读取顺序应用键值对，相等键后写胜出：先出现的键保留首见位置，
//!   值被后来者就地覆盖。
//! - `decode` 只读取一个顶层值，容忍其后的多余字节；需要消费进度的调用
//!   方使用 [`decode_prefix`]。
//!
//! # 实现策略（How）
//! - `Cursor` 把边界检查与数据提取绑定在同一组读取方法中，防止二者脱节。
//! - 递归深度由调用方可配置的上限约束（默认 [`DEFAULT_MAX_DEPTH`]），
//!   恶意深嵌套输入在耗尽栈空间前即被拒绝。
//! - 容器的预分配容量不信任线上声明的计数：每个元素至少占一个字节，
//!   以剩余输入长度为上界收紧，杜绝“声明 40 亿元素”式的分配放大。

use alloc::string::String;
use alloc::vec::Vec;
use core::str;

use crate::DEFAULT_MAX_DEPTH;
use crate::error::DecodeError;
use crate::marker;
use crate::value::Value;

/// 解码单个顶层值，使用默认递归深度上限。
///
/// # 调用契约
/// - **输入**：完整的 MessagePack 字节序列；顶层值之后允许存在多余字节，
///   它们不会被读取。
/// - **返回值**：成功时为还原出的 [`Value`]；失败时为携带定位信息的
///   [`DecodeError`]，此时输入消费进度未定义。
/// - **前置条件**：无。解码器对任意字节序列都不会 panic 或越界读取。
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_with_max_depth(bytes, DEFAULT_MAX_DEPTH)
}

/// 解码单个顶层值，并显式指定递归深度上限。
///
/// - **契约**：嵌套深度达到 `max_depth` 的节点会被
///   [`DecodeError::DepthLimitExceeded`] 拒绝；顶层节点深度为 0。
pub fn decode_with_max_depth(bytes: &[u8], max_depth: usize) -> Result<Value, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    decode_value(&mut cursor, 0, max_depth)
}

/// 解码单个顶层值并返回其消耗的字节数。
///
/// - **Why**：适配层在同一缓冲中连续堆放多个报文时需要知道边界；
///   `decode` 刻意容忍尾部多余字节，无法提供这一信息。
/// - **What**：返回 `(value, consumed)`，`consumed` 为该值在输入中占用的
///   前缀长度，`bytes[consumed..]` 即剩余未读数据。
pub fn decode_prefix(bytes: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut cursor = Cursor::new(bytes);
    let value = decode_value(&mut cursor, 0, DEFAULT_MAX_DEPTH)?;
    Ok((value, cursor.position()))
}

/// 输入缓冲上的只进读游标，所有读取方法自带剩余长度校验。
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    const fn position(&self) -> usize {
        self.pos
    }

    const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// 读取下一个 format tag。输入耗尽时返回 `UnexpectedEndOfInput`。
    fn next_tag(&mut self) -> Result<u8, DecodeError> {
        if self.pos >= self.buf.len() {
            return Err(DecodeError::UnexpectedEndOfInput);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// 消费 `len` 字节并返回对应切片；不足时报 `NotEnoughBuffer`。
    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::NotEnoughBuffer {
                field,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// 消费定长字段并拷贝为数组，供 `from_be_bytes` 族使用。
    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>(field)?[0])
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.take_array(field)?))
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.take_array(field)?))
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.take_array(field)?))
    }
}

/// 递归解码单个节点。`depth` 为当前节点深度，顶层为 0。
fn decode_value(cursor: &mut Cursor<'_>, depth: usize, max_depth: usize) -> Result<Value, DecodeError> {
    if depth >= max_depth {
        return Err(DecodeError::DepthLimitExceeded { max_depth });
    }

    let tag_offset = cursor.position();
    let tag = cursor.next_tag()?;
    match tag {
        0x00..=0x7f => Ok(Value::Integer(i64::from(tag))),
        0xe0..=0xff => Ok(Value::Integer(i64::from(tag as i8))),

        marker::NIL => Ok(Value::Nil),
        marker::FALSE => Ok(Value::Bool(false)),
        marker::TRUE => Ok(Value::Bool(true)),

        marker::UINT8 => Ok(Value::Integer(i64::from(cursor.read_u8("uint 8")?))),
        marker::UINT16 => Ok(Value::Integer(i64::from(cursor.read_u16("uint 16")?))),
        marker::UINT32 => Ok(Value::Integer(i64::from(cursor.read_u32("uint 32")?))),
        marker::UINT64 => {
            let raw = cursor.read_u64("uint 64")?;
            i64::try_from(raw)
                .map(Value::Integer)
                .map_err(|_| DecodeError::IntegerOutOfRange { value: raw })
        }

        marker::INT8 => Ok(Value::Integer(i64::from(
            cursor.read_u8("int 8")? as i8,
        ))),
        marker::INT16 => Ok(Value::Integer(i64::from(
            cursor.read_u16("int 16")? as i16,
        ))),
        marker::INT32 => Ok(Value::Integer(i64::from(
            cursor.read_u32("int 32")? as i32,
        ))),
        marker::INT64 => Ok(Value::Integer(cursor.read_u64("int 64")? as i64)),

        marker::FLOAT32 => {
            let bits = cursor.read_u32("float 32")?;
            Ok(Value::Float(f64::from(f32::from_bits(bits))))
        }
        marker::FLOAT64 => {
            let bits = cursor.read_u64("float 64")?;
            Ok(Value::Float(f64::from_bits(bits)))
        }

        0xa0..=0xbf => decode_str(cursor, usize::from(tag & 0x1f)),
        marker::STR8 => {
            let len = usize::from(cursor.read_u8("str 8 长度")?);
            decode_str(cursor, len)
        }
        marker::STR16 => {
            let len = usize::from(cursor.read_u16("str 16 长度")?);
            decode_str(cursor, len)
        }
        marker::STR32 => {
            let len = cursor.read_u32("str 32 长度")? as usize;
            decode_str(cursor, len)
        }

        marker::BIN8 => {
            let len = usize::from(cursor.read_u8("bin 8 长度")?);
            Ok(Value::Binary(cursor.take(len, "bin 载荷")?.to_vec()))
        }
        marker::BIN16 => {
            let len = usize::from(cursor.read_u16("bin 16 长度")?);
            Ok(Value::Binary(cursor.take(len, "bin 载荷")?.to_vec()))
        }
        marker::BIN32 => {
            let len = cursor.read_u32("bin 32 长度")? as usize;
            Ok(Value::Binary(cursor.take(len, "bin 载荷")?.to_vec()))
        }

        0x90..=0x9f => decode_array(cursor, usize::from(tag & 0x0f), depth, max_depth),
        marker::ARRAY16 => {
            let count = usize::from(cursor.read_u16("array 16 计数")?);
            decode_array(cursor, count, depth, max_depth)
        }
        marker::ARRAY32 => {
            let count = cursor.read_u32("array 32 计数")? as usize;
            decode_array(cursor, count, depth, max_depth)
        }

        0x80..=0x8f => decode_map(cursor, usize::from(tag & 0x0f), depth, max_depth),
        marker::MAP16 => {
            let count = usize::from(cursor.read_u16("map 16 计数")?);
            decode_map(cursor, count, depth, max_depth)
        }
        marker::MAP32 => {
            let count = cursor.read_u32("map 32 计数")? as usize;
            decode_map(cursor, count, depth, max_depth)
        }

        // 保留值 0xc1 与全部 ext 家族（0xc7-0xc9、0xd4-0xd8）。
        _ => Err(DecodeError::InvalidTag {
            tag,
            offset: tag_offset,
        }),
    }
}

/// 读取 `len` 字节的 str 载荷并要求其为合法 UTF-8。
fn decode_str(cursor: &mut Cursor<'_>, len: usize) -> Result<Value, DecodeError> {
    let offset = cursor.position();
    let bytes = cursor.take(len, "str 载荷")?;
    match str::from_utf8(bytes) {
        Ok(text) => Ok(Value::String(String::from(text))),
        Err(_) => Err(DecodeError::InvalidUtf8 { offset }),
    }
}

/// 按序解码 `count` 个数组元素，首个子错误终止整次解码。
fn decode_array(
    cursor: &mut Cursor<'_>,
    count: usize,
    depth: usize,
    max_depth: usize,
) -> Result<Value, DecodeError> {
    // 每个元素在线上至少占 1 字节，预分配容量据此收紧。
    let mut items = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        items.push(decode_value(cursor, depth + 1, max_depth)?);
    }
    Ok(Value::Array(items))
}

/// 按序解码 `count` 个键值对，相等键后写胜出。
fn decode_map(
    cursor: &mut Cursor<'_>,
    count: usize,
    depth: usize,
    max_depth: usize,
) -> Result<Value, DecodeError> {
    let mut pairs: Vec<(Value, Value)> = Vec::with_capacity(count.min(cursor.remaining() / 2));
    for _ in 0..count {
        let key = decode_value(cursor, depth + 1, max_depth)?;
        let value = decode_value(cursor, depth + 1, max_depth)?;
        insert_last_write_wins(&mut pairs, key, value);
    }
    Ok(Value::Map(pairs))
}

/// 后写胜出的键值对归档：相等键覆盖旧值并保留首见位置，新键追加到尾部。
///
/// 线性扫描的复杂度为 O(n²)；线上 map 通常很小，且该路径从不分配额外的
/// 哈希结构，因此在 `no_std` 下同样可用。`Float(NaN)` 键与自身不相等，
/// 重复的 NaN 键会按原样累积。
fn insert_last_write_wins(pairs: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    if let Some(slot) = pairs.iter_mut().find(|(existing, _)| *existing == key) {
        slot.1 = value;
    } else {
        pairs.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_input_is_unexpected_end() {
        assert_eq!(decode(&[]), Err(DecodeError::UnexpectedEndOfInput));
    }

    #[test]
    fn single_byte_forms_roundtrip_from_wire() {
        assert_eq!(decode(&[0xc0]).unwrap(), Value::Nil);
        assert_eq!(decode(&[0xc2]).unwrap(), Value::Bool(false));
        assert_eq!(decode(&[0xc3]).unwrap(), Value::Bool(true));
        assert_eq!(decode(&[0x00]).unwrap(), Value::Integer(0));
        assert_eq!(decode(&[0x7f]).unwrap(), Value::Integer(127));
        assert_eq!(decode(&[0xe0]).unwrap(), Value::Integer(-32));
        assert_eq!(decode(&[0xff]).unwrap(), Value::Integer(-1));
    }

    #[test]
    fn unsigned_tags_are_accepted_on_decode() {
        assert_eq!(decode(&[0xcc, 0xff]).unwrap(), Value::Integer(255));
        assert_eq!(decode(&[0xcd, 0x01, 0x00]).unwrap(), Value::Integer(256));
        assert_eq!(
            decode(&[0xce, 0xff, 0xff, 0xff, 0xff]).unwrap(),
            Value::Integer(4_294_967_295)
        );
        assert_eq!(
            decode(&[0xcf, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]).unwrap(),
            Value::Integer(i64::MAX)
        );
    }

    #[test]
    fn uint64_beyond_i64_is_rejected() {
        let err = decode(&[0xcf, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            err,
            Err(DecodeError::IntegerOutOfRange {
                value: i64::MAX as u64 + 1
            })
        );
    }

    #[test]
    fn signed_tags_cover_all_widths() {
        assert_eq!(decode(&[0xd0, 0x80]).unwrap(), Value::Integer(-128));
        assert_eq!(decode(&[0xd1, 0xff, 0x7f]).unwrap(), Value::Integer(-129));
        assert_eq!(
            decode(&[0xd2, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            Value::Integer(-2_147_483_648)
        );
        assert_eq!(
            decode(&[0xd3, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]).unwrap(),
            Value::Integer(-1)
        );
    }

    #[test]
    fn both_float_widths_decode() {
        assert_eq!(
            decode(&[0xca, 0x3f, 0x80, 0x00, 0x00]).unwrap(),
            Value::Float(1.0)
        );
        assert_eq!(
            decode(&[0xcb, 0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Float(1.0)
        );
    }

    #[test]
    fn str_forms_decode_with_byte_lengths() {
        assert_eq!(decode(&[0xa1, 0x61]).unwrap(), Value::from("a"));
        assert_eq!(decode(&[0xa0]).unwrap(), Value::from(""));
        assert_eq!(
            decode(&[0xd9, 0x02, 0x68, 0x69]).unwrap(),
            Value::from("hi")
        );
        assert_eq!(
            decode(&[0xda, 0x00, 0x02, 0x68, 0x69]).unwrap(),
            Value::from("hi")
        );
        assert_eq!(
            decode(&[0xdb, 0x00, 0x00, 0x00, 0x02, 0x68, 0x69]).unwrap(),
            Value::from("hi")
        );
    }

    #[test]
    fn truncated_str_payload_names_the_field() {
        assert_eq!(
            decode(&[0xd9, 0x05]),
            Err(DecodeError::NotEnoughBuffer {
                field: "str 载荷",
                needed: 5,
                remaining: 0,
            })
        );
    }

    #[test]
    fn truncated_length_field_names_the_field() {
        assert_eq!(
            decode(&[0xda, 0x00]),
            Err(DecodeError::NotEnoughBuffer {
                field: "str 16 长度",
                needed: 2,
                remaining: 1,
            })
        );
    }

    #[test]
    fn invalid_utf8_is_rejected_with_offset() {
        assert_eq!(
            decode(&[0xa2, 0xc3, 0x28]),
            Err(DecodeError::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn bin_forms_decode_raw_bytes() {
        assert_eq!(
            decode(&[0xc4, 0x03, 0x01, 0x02, 0x03]).unwrap(),
            Value::Binary(vec![1, 2, 3])
        );
        assert_eq!(
            decode(&[0xc5, 0x00, 0x01, 0xfe]).unwrap(),
            Value::Binary(vec![0xfe])
        );
        assert_eq!(
            decode(&[0xc6, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Binary(vec![])
        );
    }

    #[test]
    fn arrays_preserve_element_order() {
        assert_eq!(
            decode(&[0x92, 0x01, 0x02]).unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(
            decode(&[0xdc, 0x00, 0x01, 0xc0]).unwrap(),
            Value::Array(vec![Value::Nil])
        );
        assert_eq!(
            decode(&[0xdd, 0x00, 0x00, 0x00, 0x01, 0xc3]).unwrap(),
            Value::Array(vec![Value::Bool(true)])
        );
    }

    #[test]
    fn nested_child_error_aborts_whole_decode() {
        // fixarray(2) 中第二个元素缺失。
        assert_eq!(decode(&[0x92, 0x01]), Err(DecodeError::UnexpectedEndOfInput));
    }

    #[test]
    fn maps_decode_pairs_in_order() {
        assert_eq!(
            decode(&[0x81, 0xa1, 0x6b, 0x01]).unwrap(),
            Value::Map(vec![(Value::from("k"), Value::Integer(1))])
        );
        assert_eq!(
            decode(&[0xde, 0x00, 0x01, 0xc0, 0xc2]).unwrap(),
            Value::Map(vec![(Value::Nil, Value::Bool(false))])
        );
    }

    #[test]
    fn duplicate_keys_collapse_last_write_wins() {
        // {"k": 1, "j": 2, "k": 3} → k 保留首见位置，值被覆盖为 3。
        let bytes = [
            0x83, 0xa1, 0x6b, 0x01, 0xa1, 0x6a, 0x02, 0xa1, 0x6b, 0x03,
        ];
        assert_eq!(
            decode(&bytes).unwrap(),
            Value::Map(vec![
                (Value::from("k"), Value::Integer(3)),
                (Value::from("j"), Value::Integer(2)),
            ])
        );
    }

    #[test]
    fn reserved_and_ext_tags_are_invalid() {
        assert_eq!(
            decode(&[0xc1]),
            Err(DecodeError::InvalidTag {
                tag: 0xc1,
                offset: 0
            })
        );
        for tag in [0xc7u8, 0xc8, 0xc9, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8] {
            assert_eq!(
                decode(&[tag, 0x00]),
                Err(DecodeError::InvalidTag { tag, offset: 0 })
            );
        }
    }

    #[test]
    fn invalid_tag_reports_its_offset() {
        assert_eq!(
            decode(&[0x92, 0xc0, 0xc1]),
            Err(DecodeError::InvalidTag {
                tag: 0xc1,
                offset: 2
            })
        );
    }

    #[test]
    fn every_prefix_of_a_valid_message_errors_without_panic() {
        let bytes = crate::encode(&Value::Map(vec![
            (Value::from("list"), Value::Array(vec![
                Value::Integer(300),
                Value::Float(0.5),
                Value::from("text"),
            ])),
            (Value::from("bin"), Value::Binary(vec![0, 1, 2])),
        ]))
        .unwrap();
        for cut in 0..bytes.len() {
            assert!(decode(&bytes[..cut]).is_err(), "前缀长度 {cut} 应当报错");
        }
        assert!(decode(&bytes).is_ok());
    }

    #[test]
    fn huge_claimed_array_count_does_not_preallocate() {
        // array 32 声明 2^32-1 个元素但输入立即耗尽：应直接报错而不是
        // 先行分配数十 GiB 的容器。
        assert_eq!(
            decode(&[0xdd, 0xff, 0xff, 0xff, 0xff]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn depth_limit_rejects_deep_nesting() {
        // 连续 4 层 fixarray(1) 包住一个 Nil：Nil 位于深度 4。
        let bytes = [0x91, 0x91, 0x91, 0x91, 0xc0];
        assert_eq!(
            decode_with_max_depth(&bytes, 4),
            Err(DecodeError::DepthLimitExceeded { max_depth: 4 })
        );
        assert!(decode_with_max_depth(&bytes, 5).is_ok());
    }

    #[test]
    fn adversarial_nesting_stays_within_default_limit() {
        let mut bytes = vec![0x91u8; DEFAULT_MAX_DEPTH + 10];
        bytes.push(0xc0);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::DepthLimitExceeded {
                max_depth: DEFAULT_MAX_DEPTH
            })
        );
    }

    #[test]
    fn trailing_bytes_are_tolerated_by_decode() {
        assert_eq!(decode(&[0xc0, 0xde, 0xad]).unwrap(), Value::Nil);
    }

    #[test]
    fn decode_prefix_reports_consumed_length() {
        let (value, consumed) = decode_prefix(&[0x92, 0x01, 0x02, 0xc0]).unwrap();
        assert_eq!(value, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
        assert_eq!(consumed, 3);

        let (next, tail) = decode_prefix(&[0xc0]).unwrap();
        assert_eq!(next, Value::Nil);
        assert_eq!(tail, 1);
    }
}
