//! Embeds the commit and build time shown by `chatline --version`.
//!
//! Both values can be pinned through `CHATLINE_BUILD_GIT_HASH` and
//! `CHATLINE_BUILD_TIMESTAMP` for reproducible packaging.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "CHATLINE_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "CHATLINE_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed={HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let hash = env::var(HASH_VAR)
        .ok()
        .or_else(describe_head)
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_VAR)
        .ok()
        .or_else(utc_date)
        .unwrap_or_else(unix_seconds);

    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn describe_head() -> Option<String> {
    capture("git", &["describe", "--always", "--dirty", "--abbrev=12"])
}

fn utc_date() -> Option<String> {
    capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"])
}

fn unix_seconds() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("unix:{secs}")
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
