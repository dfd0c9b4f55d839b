use std::path::Path;
use std::process::{Command, Stdio};

fn has_display() -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }

    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).map_or(false, |value| !value.is_empty()))
}

fn opener(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Hands the written chart to the desktop image viewer. Returns whether a viewer was started.
///
/// Headless sessions are a no-op.
pub fn show_chart(path: &Path) -> bool {
    if !has_display() {
        debug!("No display available, not opening {}", path.display());
        return false;
    }

    match opener(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => {
            info!("Opened {} in the default image viewer", path.display());
            true
        }
        Err(err) => {
            warn!("Could not open {}: {}", path.display(), err);
            false
        }
    }
}
