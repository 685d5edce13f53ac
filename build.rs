use std::path::Path;
use std::process::Command;

/// Embeds the short commit hash in `SKETCHLOOP_GIT_HASH` for `--version`.
fn main() {
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=SKETCHLOOP_GIT_HASH={hash}");

    // Rebuild when HEAD moves; outside a checkout there is nothing to watch.
    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        for name in ["HEAD", "refs", "packed-refs"] {
            let path = Path::new(&git_dir).join(name);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    } else {
        println!("cargo:rerun-if-changed=build.rs");
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
