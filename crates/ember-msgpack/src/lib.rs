#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! # ember-msgpack
//!
//! ## 教案目的（Why）
//! - **定位**：动态类型值模型与 MessagePack 二进制线格式之间的双向编解码器，
//!   服务于宿主脚本环境的序列化需求。
//! - **架构角色**：宿主适配层（类型转换、生命周期注册、日志上报）作为外部
//!   协作方只调用 `encode`/`decode` 两个操作并转发结果；本 crate 自身无状态、
//!   无 I/O、无日志。
//! - **设计策略**：编码按值挑选最紧凑的线表示，解码以边界检查前置的递归
//!   下降还原值树，两侧共享同一份 format tag 常量表。
//!
//! ## 交互契约（What）
//! - **输入输出**：`encode(&Value) -> Result<Vec<u8>, EncodeError>`；
//!   `decode(&[u8]) -> Result<Value, DecodeError>`。错误以数据（kind + 可读
//!   信息）返回，从不以 panic 或进程终止表达。
//! - **符合性目标**：与 MessagePack 标准逐字节兼容；`ext` 家族明确不支持，
//!   浮点仅以 32-bit 发出但解码接受两种宽度。
//! - **并发模型**：两个操作均为同步纯函数，调用间不共享任何进程级状态，
//!   并发调用无需同步。
//!
//! ## 实现策略（How）
//! - 模块划分：[`marker`] 为共享 tag 表；[`value`] 为封闭的 tagged union；
//!   `encode`/`decode` 分别承载两条路径；[`error`] 承载错误契约。
//! - 两条路径的递归深度都以 [`DEFAULT_MAX_DEPTH`] 防护，病态深嵌套在耗尽
//!   栈空间前即被拒绝。
//!
//! ## 风险提示（Trade-offs）
//! - map 解码按后写胜出折叠重复键，因此 `decode(encode(v))` 在 v 含重复键
//!   时不保持逐对相等；MessagePack 规范对重复键保持沉默，本实现选择与
//!   原始宿主字典语义一致的折叠行为并在文档中固化。
//! - 不提供跨缓冲的流式解码；一次调用处理一个完整缓冲。

extern crate alloc;

pub mod error;
pub mod marker;
pub mod value;

mod decode;
mod encode;

pub use decode::{decode, decode_prefix, decode_with_max_depth};
pub use encode::{encode, encode_into};
pub use error::{DecodeError, EncodeError};
pub use value::Value;

/// 编解码两侧共用的默认递归深度上限。
///
/// 深度按值树节点计数，顶层为 0；达到该深度的节点会被
/// [`EncodeError::DepthLimitExceeded`] / [`DecodeError::DepthLimitExceeded`]
/// 拒绝。上限取值远大于正常业务报文的嵌套层数，同时把最坏情况的栈消耗
/// 压在单个线程栈的安全范围内。
pub const DEFAULT_MAX_DEPTH: usize = 128;
