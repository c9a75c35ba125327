/// Decode uploaded or on-disk text, guessing the encoding.
///
/// UTF-8 (with or without BOM) is preferred; anything that is not valid
/// UTF-8 is decoded as GBK, which never fails.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (cow, _, _) = encoding_rs::GBK.decode(bytes);
            cow.into_owned()
        }
    }
}
