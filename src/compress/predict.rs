use std::path::{Component, Path};

use super::COMPRESSED_SUFFIX;

/// Where Zipic is expected to write the compressed version of each target.
///
/// Output keeps the target's base name and extension with
/// [`COMPRESSED_SUFFIX`] inserted in between, placed in `directory` when
/// given and beside the original otherwise. Pure string work: nothing is
/// read from disk.
///
/// A custom suffix on the request is not reflected here; Zipic owns the
/// final name and the `-compressed` form is what it produces by default.
pub fn output_paths(targets: &[String], directory: Option<&str>) -> Vec<String> {
    targets
        .iter()
        .map(|target| output_path(Path::new(target), directory.map(Path::new)))
        .collect()
}

fn output_path(target: &Path, directory: Option<&Path>) -> String {
    let stem = match target.file_stem() {
        Some(stem) => stem.to_string_lossy(),
        // `..` and `.` have no stem; keep them as written.
        None => match target.components().next_back() {
            Some(last @ (Component::ParentDir | Component::CurDir)) => {
                last.as_os_str().to_string_lossy()
            }
            _ => Default::default(),
        },
    };
    let name = match target.extension() {
        Some(ext) => format!("{}{}.{}", stem, COMPRESSED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, COMPRESSED_SUFFIX),
    };

    // The root has no parent and stays rooted.
    let parent = directory
        .or_else(|| target.parent())
        .unwrap_or_else(|| if target.has_root() { target } else { Path::new("") });
    parent.join(name).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(targets: &[&str]) -> Vec<String> {
        targets.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_beside_original() {
        assert_eq!(
            output_paths(&paths(&["/a/b/photo.jpg"]), None),
            vec!["/a/b/photo-compressed.jpg"]
        );
    }

    #[test]
    fn test_custom_directory() {
        assert_eq!(
            output_paths(&paths(&["/x/img.png"]), Some("/out")),
            vec!["/out/img-compressed.png"]
        );
    }

    #[test]
    fn test_one_per_target_in_order() {
        let targets = paths(&["/z/last.webp", "/a/first.heic", "/m/mid.avif"]);
        assert_eq!(
            output_paths(&targets, None),
            vec![
                "/z/last-compressed.webp",
                "/a/first-compressed.heic",
                "/m/mid-compressed.avif",
            ]
        );
    }

    #[test]
    fn test_directory_target_has_no_extension() {
        assert_eq!(
            output_paths(&paths(&["/Users/me/Pictures/trip"]), None),
            vec!["/Users/me/Pictures/trip-compressed"]
        );
        assert_eq!(
            output_paths(&paths(&["/Users/me/Pictures/trip/"]), Some("/out")),
            vec!["/out/trip-compressed"]
        );
    }

    #[test]
    fn test_only_last_dot_splits_extension() {
        assert_eq!(
            output_paths(&paths(&["/a/archive.2024.jpeg"]), None),
            vec!["/a/archive.2024-compressed.jpeg"]
        );
    }

    #[test]
    fn test_directory_option_replaces_parent_for_every_target() {
        let targets = paths(&["/one/a.png", "/two/three/b.jpg"]);
        for predicted in output_paths(&targets, Some("/out/dir")) {
            assert_eq!(Path::new(&predicted).parent(), Some(Path::new("/out/dir")));
        }
    }

    #[test]
    fn test_relative_target() {
        assert_eq!(
            output_paths(&paths(&["photo.jpg"]), None),
            vec!["photo-compressed.jpg"]
        );
    }

    #[test]
    fn test_root_target_stays_absolute() {
        assert_eq!(output_paths(&paths(&["/"]), None), vec!["/-compressed"]);
        assert_eq!(
            output_paths(&paths(&["/"]), Some("/out")),
            vec!["/out/-compressed"]
        );
    }

    #[test]
    fn test_dot_components_keep_their_name() {
        assert_eq!(
            output_paths(&paths(&["/a/b/.."]), None),
            vec!["/a/b/..-compressed"]
        );
        assert_eq!(
            output_paths(&paths(&["/a/b/."]), None),
            vec!["/a/b-compressed"]
        );
    }

    #[test]
    fn test_empty_targets() {
        assert!(output_paths(&[], Some("/out")).is_empty());
    }
}
