use serde::Serialize;

use crate::utils::error::Result;

/// Serializes `value` as pretty-printed JSON indented with 4 spaces.
///
/// `serde_json::to_vec_pretty` indents with 2 spaces; the files this tool
/// rewrites are indented with 4.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
