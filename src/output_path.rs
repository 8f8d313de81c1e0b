use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Names the output for an input that wasn't given an explicit output path.
///
/// Examples with the default suffix `_padded` and extension `tga`:
///
/// - foo.png -> foo_padded.tga
/// - textures/wall.albedo.png -> textures/wall.albedo_padded.tga
/// - noext -> noext_padded.tga
pub(crate) fn default_output_path<P: AsRef<Path>>(input: P, suffix: &str, extension: &str) -> PathBuf {
    let input = input.as_ref();
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new(""));

    let mut file_name = stem.to_os_string();
    file_name.push(suffix);

    if !extension.is_empty() {
        file_name.push(".");
        file_name.push(extension.trim_start_matches('.'));
    }

    input.with_file_name(file_name)
}

#[cfg(test)]
mod test {
    use super::*;

    fn padded(input: &str) -> PathBuf {
        default_output_path(input, "_padded", "tga")
    }

    #[test]
    fn replaces_extension() {
        assert_eq!(padded("foo.png"), PathBuf::from("foo_padded.tga"));
        assert_eq!(padded("foo.tga"), PathBuf::from("foo_padded.tga"));
    }

    #[test]
    fn keeps_directory_and_inner_dots() {
        assert_eq!(
            padded("textures/wall.albedo.png"),
            PathBuf::from("textures/wall.albedo_padded.tga")
        );
    }

    #[test]
    fn no_extension() {
        assert_eq!(padded("noext"), PathBuf::from("noext_padded.tga"));
    }

    #[test]
    fn custom_suffix_and_extension() {
        assert_eq!(
            default_output_path("a/b.tif", "-bled", ".png"),
            PathBuf::from("a/b-bled.png")
        );
        assert_eq!(default_output_path("b.tif", "_x", ""), PathBuf::from("b_x"));
    }
}
