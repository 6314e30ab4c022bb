//! Media path conventions shared by the renderer, flattener and file cache.

use craftguide_types::NodeKind;

/// Reduce a display name to a file stem: alphanumerics and spaces only,
/// lowercased, spaces turned into underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// `images/{folder}/{sanitized}.png` for the kind's folder; `None` for
/// events, which have no picture.
pub fn image_path(kind: NodeKind, title: &str) -> Option<String> {
    kind.image_folder()
        .map(|folder| format!("images/{folder}/{}.png", sanitize_name(title)))
}

/// `videos/{prefix}_{sanitized}.mp4`.
pub fn video_path(prefix: &str, title: &str) -> String {
    format!("videos/{prefix}_{}.mp4", sanitize_name(title))
}
