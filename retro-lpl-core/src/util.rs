use std::path::Path;

/// File extension used for playlist files.
pub const PLAYLIST_EXTENSION: &str = "lpl";

/// Name of the immediate parent directory, used as the console key.
///
/// Returns `None` for paths without a named parent (e.g. `"game.nes"` or `"/"`).
pub fn parent_dir_name(path: &Path) -> Option<&str> {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
}

/// File name without its final extension, lossily converted to UTF-8.
///
/// `"Super Game (USA).zip"` → `"Super Game (USA)"`. Dotfiles keep their
/// full name, matching `Path::file_stem`.
pub fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Case-insensitive extension check. `ext` is given without the dot.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Playlist file name for a canonical console name: `"<console>.lpl"`.
pub fn playlist_file_name(console: &str) -> String {
    format!("{}.{}", console, PLAYLIST_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parent_dir_name() {
        assert_eq!(parent_dir_name(Path::new("roms/nes/game.nes")), Some("nes"));
        assert_eq!(parent_dir_name(Path::new("/abs/roms/snes/a.sfc")), Some("snes"));
        assert_eq!(parent_dir_name(Path::new("game.nes")), None);
        assert_eq!(parent_dir_name(Path::new("/")), None);
    }

    #[test]
    fn test_file_stem_lossy() {
        assert_eq!(file_stem_lossy(Path::new("roms/nes/Super Game 2.nes")), "Super Game 2");
        assert_eq!(file_stem_lossy(Path::new("a.b.zip")), "a.b");
        assert_eq!(file_stem_lossy(Path::new("noext")), "noext");
        assert_eq!(file_stem_lossy(&PathBuf::new()), "");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("game.zip"), "zip"));
        assert!(has_extension(Path::new("GAME.ZIP"), "zip"));
        assert!(!has_extension(Path::new("game.zip.bak"), "zip"));
        assert!(!has_extension(Path::new("zip"), "zip"));
    }

    #[test]
    fn test_playlist_file_name() {
        assert_eq!(
            playlist_file_name("Nintendo - Game Boy"),
            "Nintendo - Game Boy.lpl"
        );
    }
}
