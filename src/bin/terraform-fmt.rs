use std::process::ExitCode;

use tf_hooks::Tool;

fn main() -> ExitCode {
    tf_hooks::run_fmt_hook(Tool::Terraform)
}
