use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

/// Credentials and endpoint variables cleared before every run so the
/// developer's own environment never leaks into a test.
const ISOLATED_VARS: &[&str] = &[
    "BOARD_EXPORT_TRELLO_API_KEY",
    "BOARD_EXPORT_TRELLO_KEY",
    "BOARD_EXPORT_TRELLO_TOKEN",
    "BOARD_EXPORT_TRELLO_BASE_URL",
    "BOARD_EXPORT_TRELLO_TIMEOUT_SECS",
];

pub const TEST_KEY: &str = "test-key";
pub const TEST_TOKEN: &str = "test-token";

#[derive(Debug)]
pub struct ExportRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl ExportRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

pub struct ExportWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl ExportWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap_or_else(|e| panic!("read {name}: {e}"))
    }

    /// Exported `.txt` files in the workspace root, sorted.
    pub fn exported_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .expect("read workspace")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| Path::new(name).extension().is_some_and(|ext| ext == "txt"))
            .collect();
        names.sort();
        names
    }

    pub fn write_project_config(&self, contents: &str) {
        fs::write(self.path("board-export.yaml"), contents).expect("write project config");
    }

    pub fn write_user_config(&self, contents: &str) {
        let dir = self.root.join(".config").join("board-export");
        fs::create_dir_all(&dir).expect("user config dir");
        fs::write(dir.join("config.yaml"), contents).expect("write user config");
    }
}

/// Environment pointing the binary at a mock Trello server.
pub fn trello_env(base_url: &str) -> Vec<(String, String)> {
    vec![
        ("BOARD_EXPORT_TRELLO_API_KEY".to_string(), TEST_KEY.to_string()),
        ("BOARD_EXPORT_TRELLO_TOKEN".to_string(), TEST_TOKEN.to_string()),
        ("BOARD_EXPORT_TRELLO_BASE_URL".to_string(), base_url.to_string()),
    ]
}

pub fn run_export<I, S>(workspace: &ExportWorkspace, args: I, label: &str) -> ExportRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_export_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_export_with_env<I, S, E, K, V>(
    workspace: &ExportWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> ExportRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("board-export"));
    cmd.current_dir(&workspace.root);
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd.args(args);
    cmd.envs(env_vars);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "board_export=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env("HOME", &workspace.root);

    let start = Instant::now();
    let output = cmd.output().expect("run board-export");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let timestamp = SystemTime::now();
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        timestamp,
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    ExportRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}

pub fn extract_json_payload(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return lines[idx..].join("\n").trim().to_string();
        }
    }
    text.trim().to_string()
}
