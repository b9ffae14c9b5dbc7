//! Byte builders for unit tests; the crate itself never encodes.

pub(crate) fn varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

pub(crate) fn string(text: &str) -> Vec<u8> {
    let mut out = vec![b'S'];
    out.extend(varint(text.len() as u64));
    out.extend(text.as_bytes());
    out
}

pub(crate) fn number(value: f64) -> Vec<u8> {
    let mut out = vec![b'N'];
    out.extend(value.to_le_bytes());
    out
}

pub(crate) fn boolean(value: bool) -> Vec<u8> {
    vec![b'B', u8::from(value)]
}

pub(crate) fn entry(key: Vec<u8>, value: Vec<u8>) -> (Vec<u8>, Vec<u8>) {
    (key, value)
}

pub(crate) fn table(entries: &[(Vec<u8>, Vec<u8>)]) -> Vec<u8> {
    let mut out = vec![b'T', 0, 0, 0, 0];
    out.extend((entries.len() as i32).to_le_bytes());
    for (key, value) in entries {
        out.extend(key);
        out.extend(value);
    }
    out
}
