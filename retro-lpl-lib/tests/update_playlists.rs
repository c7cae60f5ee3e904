use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use retro_lpl_frontend::{FormatKind, JsonPlaylist, LinePlaylist, PlaylistFormat};
use retro_lpl_lib::*;

const GB: &str = "Nintendo - Game Boy";
const NES: &str = "Nintendo - Nintendo Entertainment System";

struct Layout {
    _dir: tempfile::TempDir,
    roms: PathBuf,
    thumbnails: PathBuf,
    playlists: PathBuf,
}

impl Layout {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        Self {
            roms: root.join("roms"),
            thumbnails: root.join("thumbnails"),
            playlists: root.join("playlists"),
            _dir: dir,
        }
    }

    fn rom(&self, rel: &str) -> PathBuf {
        let path = self.roms.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"rom").unwrap();
        path
    }

    fn zip(&self, rel: &str, member: &str) -> PathBuf {
        let path = self.roms.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(member, options).unwrap();
        writer.write_all(b"rom").unwrap();
        writer.finish().unwrap();
        path
    }

    fn thumbnail(&self, console: &str, title: &str) {
        let dir = self.thumbnails.join(console).join("Named_Snaps");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.png", title)), b"png").unwrap();
    }

    fn options(&self) -> UpdateOptions {
        let mut options = UpdateOptions::new(&self.roms, &self.thumbnails, &self.playlists);
        options.jobs = 2;
        options
    }

    fn playlist(&self, console: &str) -> PathBuf {
        self.playlists.join(format!("{}.lpl", console))
    }
}

fn abs(path: &Path) -> String {
    std::path::absolute(path).unwrap().display().to_string()
}

fn run(options: &UpdateOptions) -> UpdateSummary {
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(update_playlists(options))
        .unwrap()
}

#[test]
fn one_entry_per_file_in_its_console() {
    let layout = Layout::new();
    let tetris = layout.rom("gb/Tetris.gb");
    let mario = layout.rom("nes/Super Mario Bros.nes");
    layout.rom("nes/hacks/Mario Hack.nes");
    layout.rom("scratch/foo.rom");

    let summary = run(&layout.options());
    assert_eq!(summary.files_seen, 4);
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.written, vec![layout.playlist(GB), layout.playlist(NES)]);

    let gb = JsonPlaylist::new().read_playlist(&layout.playlist(GB)).unwrap();
    assert_eq!(gb.len(), 1);
    assert_eq!(gb[0].path, abs(&tetris));
    assert_eq!(gb[0].label, "Tetris");
    assert_eq!(gb[0].core_path, "DETECT");
    assert_eq!(gb[0].crc32, "0|crc");
    assert_eq!(gb[0].db_name, "");

    let nes = JsonPlaylist::new().read_playlist(&layout.playlist(NES)).unwrap();
    assert_eq!(nes.len(), 1);
    assert_eq!(nes[0].path, abs(&mario));

    assert!(!layout.playlists.join("scratch.lpl").exists());
    assert!(!layout.playlists.join("hacks.lpl").exists());
}

#[test]
fn second_run_is_byte_identical() {
    let layout = Layout::new();
    for name in ["c.gb", "a.gb", "b.gb", "sub/d.gb"] {
        layout.rom(&format!("gb/{}", name));
    }
    layout.rom("gba/x.gba");
    layout.thumbnail(GB, "A Game");

    run(&layout.options());
    let first = fs::read(layout.playlist(GB)).unwrap();
    run(&layout.options());
    let second = fs::read(layout.playlist(GB)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zip_entries_reference_first_member() {
    let layout = Layout::new();
    let archive = layout.zip("gba/Pack.zip", "game.bin");
    layout.rom("gba/broken.zip");

    run(&layout.options());
    let entries = JsonPlaylist::new()
        .read_playlist(&layout.playlist("Nintendo - Game Boy Advance"))
        .unwrap();
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&format!("{}#game.bin", abs(&archive)).as_str()));
    // An unreadable archive is still listed, as a plain file
    let broken = abs(&layout.roms.join("gba/broken.zip"));
    assert!(paths.contains(&broken.as_str()));
}

#[test]
fn labels_use_closest_thumbnail() {
    let layout = Layout::new();
    layout.rom("snes/Super Game 2.sfc");
    layout.rom("snes/Unrelated.sfc");
    let console = "Nintendo - Super Nintendo Entertainment System";
    layout.thumbnail(console, "Super Game II");
    layout.thumbnail(console, "Other Title");

    run(&layout.options());
    let entries = JsonPlaylist::new()
        .read_playlist(&layout.playlist(console))
        .unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Super Game II", "Unrelated"]);
}

#[test]
fn stale_playlists_are_purged() {
    let layout = Layout::new();
    layout.rom("gb/Tetris.gb");
    fs::create_dir_all(&layout.playlists).unwrap();
    fs::write(layout.playlists.join("nes.lpl"), b"stale").unwrap();
    fs::write(layout.playlist(NES), b"stale").unwrap();
    fs::write(layout.playlists.join("notes.txt"), b"keep").unwrap();

    let summary = run(&layout.options());
    assert_eq!(summary.purged, 2);
    assert!(!layout.playlists.join("nes.lpl").exists());
    assert!(!layout.playlist(NES).exists());
    assert!(layout.playlists.join("notes.txt").exists());
    assert!(layout.playlist(GB).exists());
}

#[test]
fn missing_rom_root_keeps_playlists() {
    let layout = Layout::new();
    fs::create_dir_all(&layout.playlists).unwrap();
    fs::write(layout.playlist(GB), b"previous").unwrap();

    let err = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(update_playlists(&layout.options()))
        .unwrap_err();
    assert!(matches!(err, PlaylistError::RomRootMissing(_)));
    assert_eq!(fs::read(layout.playlist(GB)).unwrap(), b"previous");
}

#[test]
fn lines_format_and_relative_paths() {
    let layout = Layout::new();
    layout.rom("gb/Tetris.gb");

    let mut options = layout.options();
    options.format = FormatKind::Lines;
    options.path_style = PathStyle::Relative;
    run(&options);

    let entries = LinePlaylist::new().read_playlist(&layout.playlist(GB)).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "Tetris");
    assert!(Path::new(&entries[0].path).is_relative());
    assert!(entries[0].path.ends_with("Tetris.gb"));
}

#[test]
fn unrepresentable_entry_is_dropped_not_fatal() {
    let layout = Layout::new();
    layout.zip("arcade/ok.zip", "ok.bin");
    let good = layout.rom("nes/good.nes");
    layout.rom("nes/bad\nname.nes");

    let mut options = layout.options();
    options.format = FormatKind::Lines;
    let summary = run(&options);

    assert_eq!(
        summary.written,
        vec![layout.playlist("FB Alpha - Arcade Games"), layout.playlist(NES)]
    );
    let nes = LinePlaylist::new().read_playlist(&layout.playlist(NES)).unwrap();
    let paths: Vec<&str> = nes.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec![abs(&good)]);
}

#[test]
fn failed_flush_leaves_no_partial_set() {
    let layout = Layout::new();
    layout.rom("arcade/ok.zip");
    layout.rom("nes/good.nes");
    // A directory where the NES playlist goes makes its write fail
    fs::create_dir_all(layout.playlist(NES)).unwrap();

    let err = tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(update_playlists(&layout.options()))
        .unwrap_err();

    assert!(matches!(err, PlaylistError::Write { .. }));
    let left: Vec<String> = fs::read_dir(&layout.playlists)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(left, vec![format!("{}.lpl", NES)]);
    assert!(layout.playlist(NES).is_dir());
}

#[test]
fn unsorted_entries_follow_walk_order() {
    let layout = Layout::new();
    // Walk order groups by directory component-wise: a/ < a-b/ < nes/ < x/,
    // while a string sort of the full paths puts a-b/ before a/.
    layout.rom("a/nes/zeta.nes");
    layout.rom("a-b/nes/alpha.nes");
    layout.rom("nes/mid.nes");
    layout.rom("nes/beta.nes");
    layout.rom("x/nes/omega.nes");

    let mut options = layout.options();
    options.jobs = 4;
    options.sort_entries = false;

    let labels = |layout: &Layout| -> Vec<String> {
        JsonPlaylist::new()
            .read_playlist(&layout.playlist(NES))
            .unwrap()
            .into_iter()
            .map(|e| e.label)
            .collect()
    };

    run(&options);
    let first = fs::read(layout.playlist(NES)).unwrap();
    assert_eq!(labels(&layout), vec!["zeta", "alpha", "beta", "mid", "omega"]);

    run(&options);
    assert_eq!(fs::read(layout.playlist(NES)).unwrap(), first);

    options.sort_entries = true;
    run(&options);
    assert_eq!(labels(&layout), vec!["alpha", "zeta", "beta", "mid", "omega"]);
}
