/// A user-supplied argument destined for the wrapped tool (always starts with `-`).
///
/// Pre-commit appends staged filenames to the hook's arguments; the validate
/// hook must not forward those, so only flag-shaped tokens become `Flag`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flag(String);

impl Flag {
    /// Accept a raw argument if it is flag-shaped.
    ///
    /// `-no-color` and `--json` are flags; `main.tf` and `modules/vpc` are not.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.starts_with('-') {
            Some(Flag(raw.to_string()))
        } else {
            None
        }
    }
}

impl From<Flag> for String {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

/// Keep only flag-shaped arguments, in their original order.
pub fn forwarded_flags(args: &[String]) -> Vec<String> {
    args.iter()
        .filter_map(|a| Flag::parse(a))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn flag(raw: &str) -> String {
        String::from(Flag::parse(raw).unwrap())
    }

    #[test]
    fn parse_single_dash_flag() {
        assert_eq!(flag("-no-color"), "-no-color");
    }

    #[test]
    fn parse_double_dash_flag() {
        assert_eq!(flag("--json"), "--json");
    }

    #[test]
    fn parse_flag_with_value_kept_whole() {
        assert_eq!(flag("-var=env=dev"), "-var=env=dev");
    }

    #[test]
    fn parse_positional_rejected() {
        assert!(Flag::parse("main.tf").is_none());
        assert!(Flag::parse("modules/vpc/variables.tf").is_none());
        assert!(Flag::parse("").is_none());
    }

    #[test]
    fn forwarded_flags_drop_filenames_and_keep_order() {
        let args = strings(&["main.tf", "-no-color", "vpc/outputs.tf", "--json"]);
        assert_eq!(forwarded_flags(&args), strings(&["-no-color", "--json"]));
    }

    #[test]
    fn forwarded_flags_empty_input() {
        assert!(forwarded_flags(&[]).is_empty());
    }
}
