const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";

pub fn is_tchar(byte: u8) -> bool {
    (0x21..=0x7e).contains(&byte) && !SEPARATORS.contains(&byte)
}

pub fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|byte| is_tchar(*byte))
}

pub fn is_vchar(byte: u8) -> bool {
    (0x21..=0x7e).contains(&byte)
}

pub fn is_obs_text(byte: u8) -> bool {
    byte >= 0x80
}

pub fn is_ows(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

pub fn is_field_byte(byte: u8) -> bool {
    is_ows(byte) || is_vchar(byte) || is_obs_text(byte)
}

pub fn trim_ows(value: &str) -> &str {
    value.trim_matches(|c| c == ' ' || c == '\t')
}

pub fn eq_ignore_case(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
