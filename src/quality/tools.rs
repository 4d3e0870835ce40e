//! Formatter and linter tables, keyed by file extension
//!
//! Within a list, tools are tried in order of preference.

/// One external tool invocation; the file path is appended when
/// `takes_file` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// Display name
    pub name: &'static str,

    /// Executable looked up on PATH
    pub program: &'static str,

    /// Arguments placed before the file path
    pub args: &'static [&'static str],

    pub takes_file: bool,
}

impl ToolSpec {
    const fn new(name: &'static str, program: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            name,
            program,
            args,
            takes_file: true,
        }
    }

    /// Tool that works on the whole project instead of one file
    const fn project(name: &'static str, program: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            name,
            program,
            args,
            takes_file: false,
        }
    }

    /// Full argument list for a file
    pub fn args_for<'a>(&'a self, file: &'a str) -> Vec<&'a str> {
        let mut args: Vec<&'a str> = self.args.to_vec();
        if self.takes_file {
            args.push(file);
        }
        args
    }
}

const PYTHON_FORMATTERS: &[ToolSpec] = &[
    ToolSpec::new("black", "black", &["--quiet"]),
    ToolSpec::new("autopep8", "autopep8", &["--in-place"]),
    ToolSpec::new("yapf", "yapf", &["-i"]),
];
const PRETTIER: &[ToolSpec] = &[ToolSpec::new("prettier", "prettier", &["--write"])];
const RUST_FORMATTERS: &[ToolSpec] = &[ToolSpec::new("rustfmt", "rustfmt", &[])];
const GO_FORMATTERS: &[ToolSpec] = &[
    ToolSpec::new("gofmt", "gofmt", &["-w"]),
    ToolSpec::new("goimports", "goimports", &["-w"]),
];
const JAVA_FORMATTERS: &[ToolSpec] =
    &[ToolSpec::new("google-java-format", "google-java-format", &["-i"])];
const RUBY_FORMATTERS: &[ToolSpec] = &[ToolSpec::new("rubocop -a", "rubocop", &["-a"])];
const PHP_FORMATTERS: &[ToolSpec] = &[ToolSpec::new("php-cs-fixer", "php-cs-fixer", &["fix"])];
const C_FORMATTERS: &[ToolSpec] = &[ToolSpec::new("clang-format", "clang-format", &["-i"])];
const SWIFT_FORMATTERS: &[ToolSpec] = &[ToolSpec::new("swiftformat", "swiftformat", &[])];

const PYTHON_LINTERS: &[ToolSpec] = &[
    ToolSpec::new("pylint", "pylint", &[]),
    ToolSpec::new("flake8", "flake8", &[]),
    ToolSpec::new("mypy", "mypy", &[]),
];
const ESLINT: &[ToolSpec] = &[ToolSpec::new("eslint", "eslint", &[])];
const RUST_LINTERS: &[ToolSpec] = &[ToolSpec::project(
    "clippy",
    "cargo",
    &["clippy", "--quiet", "--", "-D", "warnings"],
)];
const GO_LINTERS: &[ToolSpec] = &[
    ToolSpec::new("golint", "golint", &[]),
    ToolSpec::new("go vet", "go", &["vet"]),
];
const JAVA_LINTERS: &[ToolSpec] = &[ToolSpec::new("checkstyle", "checkstyle", &[])];
const RUBY_LINTERS: &[ToolSpec] = &[ToolSpec::new("rubocop", "rubocop", &[])];
const PHP_LINTERS: &[ToolSpec] = &[ToolSpec::new("phpcs", "phpcs", &[])];

/// Formatters for a file extension (without the dot)
pub fn formatters_for(extension: &str) -> &'static [ToolSpec] {
    match extension.to_ascii_lowercase().as_str() {
        "py" => PYTHON_FORMATTERS,
        "js" | "ts" | "jsx" | "tsx" => PRETTIER,
        "rs" => RUST_FORMATTERS,
        "go" => GO_FORMATTERS,
        "java" => JAVA_FORMATTERS,
        "rb" => RUBY_FORMATTERS,
        "php" => PHP_FORMATTERS,
        "c" | "cpp" | "h" => C_FORMATTERS,
        "swift" => SWIFT_FORMATTERS,
        _ => &[],
    }
}

/// Linters for a file extension (without the dot)
pub fn linters_for(extension: &str) -> &'static [ToolSpec] {
    match extension.to_ascii_lowercase().as_str() {
        "py" => PYTHON_LINTERS,
        "js" | "ts" | "jsx" | "tsx" => ESLINT,
        "rs" => RUST_LINTERS,
        "go" => GO_LINTERS,
        "java" => JAVA_LINTERS,
        "rb" => RUBY_LINTERS,
        "php" => PHP_LINTERS,
        _ => &[],
    }
}
