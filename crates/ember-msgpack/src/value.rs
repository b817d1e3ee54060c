//! 动态类型值模型。
//!
//! # 教案定位（Why）
//! - `Value` 是编码输入与解码输出的统一表示，宿主适配层负责在自身的动态类型
//!   与 `Value` 之间转换，编解码逻辑只面对这一封闭枚举。
//! - 采用封闭的 tagged union 而非开放 trait，使编码器能够以穷尽 `match`
//!   覆盖全部线格式分支，杜绝遗漏。
//!
//! # 契约说明（What）
//! - `String` 的长度语义为 UTF-8 字节长度而非字符数。
//! - `Map` 保存有序的键值对序列：键不要求唯一也不要求可哈希，重复键在模型中
//!   合法；解码路径按后写胜出（last write wins）规则折叠重复键，见
//!   [`crate::decode()`]。
//! - `Value` 一经构造即按所有权独占使用，编码器通过 `&Value` 只读访问，
//!   不会修改输入。

use alloc::string::String;
use alloc::vec::Vec;

/// 编解码两侧共用的动态值。
///
/// ### Why
/// - 枚举变体与 MessagePack 的类型族一一对应，`Float` 统一存放 `f64`：
///   解码 float 32 时无损加宽，编码时收窄为单精度发出。
///
/// ### What
/// - `Integer` 限定 64-bit 有符号范围；线上的 uint 64 若超出该范围，
///   解码会以 `IntegerOutOfRange` 拒绝。
/// - `Array`/`Map` 的长度在线格式中必须小于 `2^32`，超出属于编码期错误。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 空值。
    Nil,
    /// 布尔值。
    Bool(bool),
    /// 64-bit 有符号整数。
    Integer(i64),
    /// IEEE-754 浮点值。编码总是发出 32-bit，解码两种宽度都接受。
    Float(f64),
    /// UTF-8 字符串。
    String(String),
    /// 原始字节序列，无 UTF-8 约束。
    Binary(Vec<u8>),
    /// 有序元素序列，保持插入顺序。
    Array(Vec<Value>),
    /// 有序键值对序列，允许重复键。
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// 返回变体的稳定名称，用于错误信息与诊断输出。
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// 判断是否为 `Nil`。
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// 若为 `Bool` 则返回其载荷。
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// 若为 `Integer` 则返回其载荷。
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// 若为 `Float` 则返回其载荷。
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// 若为 `String` 则返回字符串切片。
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// 若为 `Binary` 则返回字节切片。
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// 若为 `Array` 则返回元素切片。
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// 若为 `Map` 则返回键值对切片。
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// 在 `Map` 中按键查找对应的值。
    ///
    /// - **契约**：线性扫描，返回首个与 `key` 相等的条目；解码产物经过
    ///   后写胜出折叠后每个键至多出现一次，首个命中即唯一命中。
    /// - 非 `Map` 变体上调用始终返回 `None`。
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(v: Vec<(Value, Value)>) -> Self {
        Value::Map(v)
    }
}
