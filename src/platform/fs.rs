// Vitrine - platform/fs.rs
//
// Desktop integration: handing paths to the host file manager. Both
// helpers spawn the manager detached and swallow launch failures after
// logging them; the GUI thread never waits on another process.

use std::path::Path;
use std::process::Command;

fn spawn_detached(mut cmd: Command, target: &Path, action: &str) {
    if let Err(e) = cmd.spawn() {
        tracing::warn!(path = %target.display(), error = %e, "{action} failed");
    }
}

/// Open `dir` itself in the system file manager.
///
/// Backs the "Open Catalogue Folder" action so users can drop pack
/// files in without hunting down the platform config path by hand.
pub fn open_directory(dir: &Path) {
    let mut cmd = if cfg!(target_os = "windows") {
        Command::new("explorer")
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(dir);
    spawn_detached(cmd, dir, "Opening directory in file manager");
}

/// Ask the file manager to show `path` selected inside its folder.
///
/// Windows Explorer takes `/select,<path>` as one argument (no space
/// after the comma); Finder has `open -R`. Linux file managers expose
/// no portable per-file selection, so the parent directory is opened
/// there instead.
pub fn reveal_in_file_manager(path: &Path) {
    let mut cmd;
    if cfg!(target_os = "windows") {
        cmd = Command::new("explorer");
        cmd.arg(format!("/select,{}", path.display()));
    } else if cfg!(target_os = "macos") {
        cmd = Command::new("open");
        cmd.arg("-R").arg(path);
    } else {
        cmd = Command::new("xdg-open");
        cmd.arg(path.parent().unwrap_or(path));
    }
    spawn_detached(cmd, path, "Revealing file in file manager");
}
