use std::path::PathBuf;

/// XDG app name used for every gnsync path.
pub const APP_NAME: &str = "gnsync";

/// Default log file name inside the state directory.
pub const LOG_FILE_NAME: &str = "gnsync.log";

fn project_config_dir(app_name: &str) -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

fn project_state_dir(app_name: &str) -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", app_name).map(|dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf()
    })
}

fn runtime_dir_for_name(app_name: &str, runtime_root: Option<&str>, uid: u32) -> PathBuf {
    if let Some(runtime_root) = runtime_root {
        return PathBuf::from(runtime_root).join(app_name);
    }
    PathBuf::from("/tmp").join(format!("{app_name}-{uid}"))
}

fn effective_uid() -> u32 {
    #[cfg(unix)]
    {
        // SAFETY: `geteuid` has no preconditions and returns caller effective UID.
        unsafe { libc::geteuid() }
    }
    #[cfg(not(unix))]
    {
        0
    }
}

/// Config directory (`~/.config/gnsync`).
pub fn config_dir() -> Option<PathBuf> {
    project_config_dir(APP_NAME)
}

/// State directory (`~/.local/state/gnsync`), falling back to the local data dir
/// on platforms without an XDG state dir.
pub fn state_dir() -> Option<PathBuf> {
    project_state_dir(APP_NAME)
}

/// State directory, or a temp-dir fallback when no home directory is known
/// (e.g. in containers).
pub fn state_dir_or_fallback() -> PathBuf {
    state_dir().unwrap_or_else(state_dir_fallback)
}

pub fn state_dir_fallback() -> PathBuf {
    std::env::temp_dir().join(format!("{APP_NAME}-state"))
}

/// Runtime directory holding per-directory run locks.
pub fn runtime_dir() -> PathBuf {
    let runtime_root = std::env::var("XDG_RUNTIME_DIR").ok();
    runtime_dir_for_name(APP_NAME, runtime_root.as_deref(), effective_uid())
}

/// Default log file: `{state_dir}/gnsync.log`.
pub fn default_log_path() -> PathBuf {
    state_dir_or_fallback().join(LOG_FILE_NAME)
}
