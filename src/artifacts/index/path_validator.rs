/// Check whether a name may be staged in the index
///
/// Accepts relative `/`-separated paths. Rejects the empty name, absolute paths,
/// empty segments (`a//b`, trailing `/`) and any segment starting with `.`,
/// which covers `.`, `..` and hidden files.
pub fn is_valid_path(path: impl AsRef<[u8]>) -> bool {
    let path = path.as_ref();

    !path.is_empty()
        && path
            .split(|&b| b == b'/')
            .all(|segment| segment.first().is_some_and(|&first| first != b'.'))
}
