use std::path::PathBuf;
use std::process::Command;

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tlint"))
}

/// `tlint check .` run from `directory`, without colors.
pub fn tlint_check(directory: &std::path::Path) -> Command {
    let mut command = Command::new(binary_path());
    command
        .current_dir(directory)
        .env("NO_COLOR", "1")
        .env_remove("TLINT_LOG")
        .arg("check")
        .arg(".");
    command
}
