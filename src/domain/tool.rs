/// The infrastructure-as-code binary a hook wraps.
///
/// Carries the conventions that differ between the two tools: program name,
/// human-facing name, recognized file suffixes and the `fmt -check` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Tofu,
    Terraform,
}

impl Tool {
    /// Program name looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            Tool::Tofu => "tofu",
            Tool::Terraform => "terraform",
        }
    }

    /// Name used in status lines (`OpenTofu`, `Terraform`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Tofu => "OpenTofu",
            Tool::Terraform => "Terraform",
        }
    }

    /// File suffixes that mark a configuration directory.
    pub fn default_extensions(&self) -> &'static [&'static str] {
        match self {
            Tool::Tofu => &[".tf", ".tofu"],
            Tool::Terraform => &[".tf"],
        }
    }

    /// Arguments for the non-mutating format check.
    ///
    /// `tofu` also prints a diff so the hook output shows what will change.
    pub fn fmt_check_args(&self) -> &'static [&'static str] {
        match self {
            Tool::Tofu => &["fmt", "-check", "-recursive", "--diff"],
            Tool::Terraform => &["fmt", "-check", "-recursive"],
        }
    }

    /// Arguments for the rewriting format run.
    pub fn fmt_write_args(&self) -> &'static [&'static str] {
        &["fmt", "-recursive"]
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
