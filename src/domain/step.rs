/// One of the two ordered tool invocations run per configuration directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Init,
    Validate,
}

impl Step {
    /// Subcommand name as passed to the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Init => "init",
            Step::Validate => "validate",
        }
    }

    /// Base arguments, before user-supplied flags are appended.
    ///
    /// `init` never prompts and never touches a remote backend.
    pub fn base_args(&self) -> &'static [&'static str] {
        match self {
            Step::Init => &["init", "-input=false", "--backend=false"],
            Step::Validate => &["validate"],
        }
    }

    /// Full argument list: base arguments followed by `extra_flags`.
    pub fn args(&self, extra_flags: &[String]) -> Vec<String> {
        self.base_args()
            .iter()
            .map(|s| s.to_string())
            .chain(extra_flags.iter().cloned())
            .collect()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
