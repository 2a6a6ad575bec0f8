//! Shell script standing in for the `raxml-ng` executable
//!
//! The script understands `--version`, `--start`, `--rfdist` and `--parse`,
//! writes the files RAxML-NG would write for the given `--prefix`, and
//! appends every command line it receives to `calls.log` next to itself.

use std::path::{Path, PathBuf};

/// Name of the file the mock appends its command lines to
pub const CALLS_LOG: &str = "calls.log";

/// Configurable mock RAxML-NG
#[derive(Debug, Clone)]
pub struct MockRaxmlNgScript {
    pub banner: String,
    pub unique_topologies: usize,
    pub rel_rfdist: f64,
    pub abs_rfdist: f64,
    /// Sites, patterns, gap percentage and invariant percentage for `--parse`
    pub parse_summary: (usize, usize, f64, f64),
    /// Skip writing the `.raxml.startTree` file
    pub omit_start_tree: bool,
    /// Exit code of every command but `--version`
    pub exit_code: i32,
    /// Printed as `ERROR: <message>` when `exit_code` is non-zero
    pub error_message: Option<String>,
}

impl Default for MockRaxmlNgScript {
    fn default() -> Self {
        Self {
            banner: "RAxML-NG v. 1.2.0 released on 09.05.2023 by The Exelixis Lab.".to_string(),
            unique_topologies: 11,
            rel_rfdist: 0.391304,
            abs_rfdist: 3.130435,
            parse_summary: (1940, 933, 7.89, 59.79),
            omit_start_tree: false,
            exit_code: 0,
            error_message: None,
        }
    }
}

impl MockRaxmlNgScript {
    /// A mock whose tree searches fail with `ERROR: <message>`
    pub fn failing(message: &str) -> Self {
        Self {
            exit_code: 1,
            error_message: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn failure_block(&self) -> String {
        if self.exit_code == 0 {
            return String::new();
        }
        let output = match &self.error_message {
            Some(message) => format!("echo \"ERROR: {}\"", message),
            None => "i=1\nwhile [ \"$i\" -le 30 ]; do echo \"progress line $i\"; i=$((i+1)); done"
                .to_string(),
        };
        format!("{}\nexit {}\n", output, self.exit_code)
    }

    /// Render the shell script
    pub fn script(&self) -> String {
        let start_tree = if self.omit_start_tree {
            ":"
        } else {
            "i=0\n    : > \"$prefix.raxml.startTree\"\n    while [ \"$i\" -lt \"$ntrees\" ]; do echo \"((A,B),(C,D));\" >> \"$prefix.raxml.startTree\"; i=$((i+1)); done"
        };
        let (sites, patterns, gaps, invariant) = self.parse_summary;

        format!(
            r#"#!/bin/sh
# Mock RAxML-NG binary for testing
echo "$@" >> "$(dirname "$0")/{calls_log}"

mode=""
prefix="mock"
ntrees=1
while [ "$#" -gt 0 ]; do
  case "$1" in
    --version)
      echo "{banner}"
      exit 0
      ;;
    --start) mode=start ;;
    --parse) mode=parse ;;
    --rfdist) mode=rfdist; shift ;;
    --prefix) shift; prefix="$1" ;;
    --tree) shift; ntrees=$(echo "$1" | tr -cd '0-9') ;;
    --msa|--model|--seed|--threads) shift ;;
  esac
  shift
done

echo "{banner}"
{failure}
case "$mode" in
  start)
    {start_tree}
    echo "Parsimony trees written" > "$prefix.raxml.log"
    ;;
  rfdist)
    cat > "$prefix.raxml.log" <<EOF
{banner}

Average absolute RF distance in this tree set: {abs_rf}
Average relative RF distance in this tree set: {rel_rf}
Number of unique topologies in this tree set: {topologies}
EOF
    ;;
  parse)
    cat > "$prefix.raxml.log" <<EOF
{banner}

Alignment sites / patterns: {sites} / {patterns}
Gaps: {gaps} %
Invariant sites: {invariant} %
EOF
    ;;
esac
exit 0
"#,
            calls_log = CALLS_LOG,
            banner = self.banner,
            failure = self.failure_block(),
            start_tree = start_tree,
            abs_rf = self.abs_rfdist,
            rel_rf = self.rel_rfdist,
            topologies = self.unique_topologies,
            sites = sites,
            patterns = patterns,
            gaps = gaps,
            invariant = invariant,
        )
    }

    /// Write the script as an executable `raxml-ng` in `dir`
    pub fn install(&self, dir: &Path) -> PathBuf {
        let path = dir.join("raxml-ng");
        std::fs::write(&path, self.script())
            .unwrap_or_else(|e| panic!("failed to write mock raxml-ng: {}", e));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)
                .expect("mock raxml-ng exists")
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).expect("mock raxml-ng is writable");
        }

        path
    }
}

/// Command lines received by a mock installed in `dir`
pub fn recorded_calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join(CALLS_LOG))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_contains_configured_values() {
        let script = MockRaxmlNgScript {
            unique_topologies: 3,
            ..Default::default()
        }
        .script();

        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("Number of unique topologies in this tree set: 3"));
        assert!(script.contains("Invariant sites: 59.79 %"));
        assert!(!script.contains("ERROR"));
    }

    #[test]
    fn test_failing_script() {
        let script = MockRaxmlNgScript::failing("Invalid model").script();
        assert!(script.contains("echo \"ERROR: Invalid model\""));
        assert!(script.contains("exit 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = MockRaxmlNgScript::default().install(dir.path());
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
        assert!(recorded_calls(dir.path()).is_empty());
    }
}
