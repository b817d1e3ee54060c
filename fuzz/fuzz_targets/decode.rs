#![no_main]

use ember_msgpack::{decode, decode_prefix, encode};
use libfuzzer_sys::fuzz_target;

// 任意字节序列喂给解码器都不得 panic、越界或失控分配；
// 一旦解码成功，重编码必须同样成功，且其产物可以完整解码。
// 字节级不动点不在此断言：NaN 载荷在收窄/加宽链路上不保证位稳定。
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = decode(data) {
        let bytes = encode(&value).expect("解码成功的值必须可以重新编码");
        let (_, consumed) = decode_prefix(&bytes).expect("重编码产物必须可解码");
        assert_eq!(consumed, bytes.len(), "编码产物不应包含尾部多余字节");
    }
});
