use std::process::ExitCode;

use tf_hooks::Tool;

fn main() -> ExitCode {
    tf_hooks::run_validate_hook(Tool::Tofu)
}
