use std::borrow::Cow;

/// Appends `extension` to `path` when its last segment has no extension of
/// its own.
pub(crate) fn with_default_extension<'a>(path: &'a str, extension: &str) -> Cow<'a, str> {
    let basename = path.rsplit('/').next().unwrap_or(path);
    if basename.contains('.') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}{extension}"))
    }
}
