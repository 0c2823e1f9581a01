//! Normalization of compiler-emitted source paths.
//!
//! Some documents carry the absolute path of the installed toolchain, so the
//! interesting part starts at the `libraries/` segment. Links and data
//! attributes only ever use the stripped form.

/// Keep only the `libraries/...` suffix of a source path, if present.
pub fn strip_source(source: &str) -> &str {
    match source.find("libraries/") {
        Some(start) => &source[start..],
        None => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_source() {
        assert_eq!(
            strip_source("/usr/local/lib/node_modules/compiler/libraries/common/list.effekt"),
            "libraries/common/list.effekt"
        );
        assert_eq!(strip_source("src/main.effekt"), "src/main.effekt");
        assert_eq!(strip_source(""), "");
    }
}
