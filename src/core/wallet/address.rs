use tonlib_core::TonAddress;

/// Render a raw `workchain:hex` address user-friendly and non-bounceable.
///
/// Falls back to the input when it is not a raw address.
pub fn to_non_bounceable(raw: &str) -> String {
    match TonAddress::from_hex_str(raw) {
        Ok(address) => address.to_base64_url_flags(true, false),
        Err(_) => raw.to_string(),
    }
}
