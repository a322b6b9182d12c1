// Shared test helpers for integration tests.
// Each test gets a scratch tree plus a private PATH holding a fake tool script,
// so the hooks run end to end without a real tofu or terraform install.
#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Stand-in for `tofu`/`terraform`. Behavior is driven by marker files in
/// the directory it runs in; it only uses shell builtins because PATH holds
/// nothing but the fake itself.
pub const FAKE_TOOL: &str = r#"#!/bin/sh
case "$1" in
  init)
    echo "Initializing the backend..."
    if [ -f init_fails.tf ]; then
      echo "Error: Failed to query available provider packages"
      exit 1
    fi
    if [ -f lock_warning.tf ]; then
      echo "Warning: Dependency lock file entries automatically updated"
      echo "The tool rewrote some entries in your dependency lock file."
      exit 1
    fi
    echo "Initialization complete."
    ;;
  validate)
    if [ -f slow.tf ]; then
      exec /bin/sleep 5
    fi
    if [ -f broken.tf ]; then
      echo "Error: Invalid resource type" >&2
      echo "  on broken.tf line 1" >&2
      exit 1
    fi
    echo "Success! The configuration is valid. args: $*"
    ;;
  fmt)
    if [ "$2" = "-check" ]; then
      echo "check: $*"
      if [ -f usage_error.tf ]; then
        echo "flag provided but not defined: -bogus"
        exit 1
      fi
      if [ -f syntax_error.tf ]; then
        echo "Error: Invalid expression"
        exit 2
      fi
      if [ -f ugly.tf ] && [ ! -f .formatted ]; then
        echo "ugly.tf"
        exit 3
      fi
      exit 0
    fi
    echo "write: $*"
    : > .formatted
    ;;
esac
exit 0
"#;

#[derive(Debug, Clone, Copy)]
pub enum Hook {
    TofuValidate,
    TofuFmt,
    TerraformValidate,
    TerraformFmt,
}

impl Hook {
    pub fn binary_path(self) -> PathBuf {
        let path = PathBuf::from(match self {
            Hook::TofuValidate => env!("CARGO_BIN_EXE_tofu-validate"),
            Hook::TofuFmt => env!("CARGO_BIN_EXE_tofu-fmt"),
            Hook::TerraformValidate => env!("CARGO_BIN_EXE_terraform-validate"),
            Hook::TerraformFmt => env!("CARGO_BIN_EXE_terraform-fmt"),
        });
        assert!(path.exists(), "binary not found at {}", path.display());
        path
    }
}

/// A scratch project (`<tmp>/infra`) and a private bin directory (`<tmp>/bin`).
pub struct Workspace {
    _tmp: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let root = tmp.path().join("infra");
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&bin).unwrap();
        Self {
            _tmp: tmp,
            root,
            bin,
        }
    }

    /// Workspace with the fake script installed as `program`.
    pub fn with_tool(program: &str) -> Self {
        let ws = Self::new();
        ws.install(program, FAKE_TOOL);
        ws
    }

    pub fn install(&self, program: &str, script: &str) {
        let path = self.bin.join(program);
        std::fs::write(&path, script).expect("failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Create a file (and its parents) below the project root.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }

    /// Runs a hook in the project root with the private PATH.
    /// Returns (stdout, stderr, exit_code).
    pub fn run(&self, hook: Hook, args: &[&str]) -> (String, String, i32) {
        run_in(&self.root, &self.bin, hook, args)
    }
}

pub fn run_in(cwd: &Path, path_env: &Path, hook: Hook, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(hook.binary_path())
        .args(args)
        .current_dir(cwd)
        .env("PATH", path_env)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}
