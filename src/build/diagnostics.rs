//! Compiler failure diagnostics and pattern matching
//!
//! Analyzes the captured output of a failed compiler run and suggests fixes
//! for the common failure patterns of GCC and MSVC.

use regex::Regex;

use crate::build::toolchains::CompilerFamily;

/// Failure category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Header not found on the include path
    MissingHeader,
    /// Compiler error in a translation unit
    CompilerError,
    /// Linker error
    LinkerError,
    /// Permission error
    PermissionError,
    /// Disk space error
    DiskSpaceError,
}

impl ErrorCategory {
    fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::MissingHeader => "Missing Header",
            ErrorCategory::CompilerError => "Compiler Error",
            ErrorCategory::LinkerError => "Linker Error",
            ErrorCategory::PermissionError => "Permission Error",
            ErrorCategory::DiskSpaceError => "Disk Space Error",
        }
    }
}

/// Lines of compiler output echoed under a diagnosis
const MAX_EVIDENCE: usize = 5;

/// What went wrong in a failed compile, and what to try next
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub category: ErrorCategory,
    /// One-line summary of the failure
    pub summary: String,
    /// Most likely fix first
    pub suggestions: Vec<String>,
    /// Compiler output lines the diagnosis is based on
    pub evidence: Vec<String>,
}

impl Diagnostic {
    pub fn new(category: ErrorCategory, summary: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            category,
            summary: summary.into(),
            suggestions,
            evidence: Vec::new(),
        }
    }

    fn with_line(mut self, line: &str) -> Self {
        self.evidence.push(line.trim().to_string());
        self
    }

    /// Keep every output line containing one of `needles`
    fn with_matching_lines(mut self, output: &str, needles: &[&str]) -> Self {
        self.evidence.extend(
            output
                .lines()
                .filter(|line| needles.iter().any(|n| line.contains(n)))
                .map(|line| line.trim().to_string()),
        );
        self
    }

    /// Plain-text rendering, one entry per printed line
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("{}: {}", self.category.as_str(), self.summary)];
        lines.extend(
            self.evidence
                .iter()
                .take(MAX_EVIDENCE)
                .map(|line| format!("  | {}", line)),
        );
        if self.evidence.len() > MAX_EVIDENCE {
            lines.push(format!("  | ({} more)", self.evidence.len() - MAX_EVIDENCE));
        }
        lines.extend(self.suggestions.iter().map(|s| format!("  try: {}", s)));
        lines
    }

    /// Print below the compiler output on stderr
    pub fn print(&self) {
        use console::style;

        eprintln!();
        for (i, line) in self.render().into_iter().enumerate() {
            if i == 0 {
                eprintln!("{} {}", style("diagnosis").cyan().bold(), style(line).bold());
            } else if line.starts_with("  try:") {
                eprintln!("{}", style(line).yellow());
            } else {
                eprintln!("{}", style(line).dim());
            }
        }
    }
}

/// Analyze compiler output and provide diagnostics
pub fn analyze_compiler_output(output: &str, compiler: CompilerFamily) -> Option<Diagnostic> {
    check_missing_header(output)
        .or_else(|| check_linker_errors(output, compiler))
        .or_else(|| check_compiler_errors(output))
        .or_else(|| check_permission_errors(output))
        .or_else(|| check_disk_space_errors(output))
}

fn check_missing_header(output: &str) -> Option<Diagnostic> {
    let patterns = [
        // gcc / clang
        r"fatal error: ([^\s:]+\.h): No such file or directory",
        r"fatal error: '([^']+\.h)' file not found",
        // cl
        r"fatal error C1083: Cannot open include file: '([^']+)'",
    ];

    for pattern in &patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(cap) = re.captures(output) {
                let header = cap.get(1).map_or("unknown", |m| m.as_str());

                let diag = Diagnostic::new(
                    ErrorCategory::MissingHeader,
                    format!("Header not found: {}", header),
                    vec![
                        format!("Place {} under the include/ directory", header),
                        "Check the spelling and path in the #include directive".to_string(),
                        format!("Install the development package that provides {}", header),
                    ],
                )
                .with_line(cap.get(0).map_or("", |m| m.as_str()));

                return Some(diag);
            }
        }
    }

    None
}

fn check_linker_errors(output: &str, compiler: CompilerFamily) -> Option<Diagnostic> {
    if let Some(diag) = check_missing_library(output) {
        return Some(diag);
    }

    if output.contains("undefined reference") || output.contains("unresolved external symbol") {
        let mut suggestions = vec![
            "Check that every function used is defined in a source file under src/".to_string(),
            "Add the static library providing the symbol to the library/ directory".to_string(),
            "Verify function declarations in headers match their definitions".to_string(),
        ];
        if compiler == CompilerFamily::Gcc {
            suggestions.push(
                "Static libraries are linked in name order; a library needed by another must sort after it"
                    .to_string(),
            );
        }

        return Some(
            Diagnostic::new(ErrorCategory::LinkerError, "Undefined symbols (linker error)", suggestions)
                .with_matching_lines(output, &["undefined reference", "unresolved external symbol"]),
        );
    }

    if output.contains("multiple definition") || output.contains("duplicate symbol") || output.contains("LNK2005") {
        return Some(
            Diagnostic::new(
                ErrorCategory::LinkerError,
                "Duplicate symbols (linker error)",
                vec![
                    "The same symbol is defined in more than one source file or library".to_string(),
                    "Mark helper functions static or move definitions out of headers".to_string(),
                    "Remove duplicate copies of a library from library/".to_string(),
                ],
            )
            .with_matching_lines(output, &["multiple definition", "duplicate symbol", "LNK2005"]),
        );
    }

    None
}

/// Libraries are passed by path, so a missing one is a missing input file
fn check_missing_library(output: &str) -> Option<Diagnostic> {
    let patterns = [
        // gcc / clang
        r"(?m)^.*error: ([^\s:]+\.a): No such file or directory.*$",
        // link.exe
        r"(?m)^.*LNK1181: cannot open input file '([^']+)'.*$",
    ];

    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(cap) = re.captures(output) {
            let library = cap.get(1).map_or("unknown", |m| m.as_str());
            return Some(
                Diagnostic::new(
                    ErrorCategory::LinkerError,
                    format!("Static library not found: {}", library),
                    vec![
                        format!("Make sure {} still exists under library/", library),
                        "Re-run the build; library/ is scanned once when it starts".to_string(),
                        "On Windows, .lib files must be built for the same architecture".to_string(),
                    ],
                )
                .with_line(cap.get(0).map_or("", |m| m.as_str())),
            );
        }
    }

    None
}

fn check_compiler_errors(output: &str) -> Option<Diagnostic> {
    let re = Regex::new(r"(?m)^.*\.[ch](:\d+(:\d+)?:|\(\d+\)) ?:? ?(fatal )?error( C\d+)?:.*$").ok()?;
    let matches: Vec<String> = re.find_iter(output).map(|m| m.as_str().trim().to_string()).collect();
    if matches.is_empty() {
        return None;
    }

    let mut diag = Diagnostic::new(
        ErrorCategory::CompilerError,
        format!("Compilation failed with {} error(s)", matches.len()),
        vec![
            "Fix the reported errors in the source files listed above".to_string(),
            "Ensure all headers are included correctly".to_string(),
            "Check compiler warnings for hints".to_string(),
        ],
    );
    diag.evidence = matches;
    Some(diag)
}

fn check_permission_errors(output: &str) -> Option<Diagnostic> {
    if output.contains("Permission denied") || output.contains("EACCES") || output.contains("LNK1104") {
        return Some(Diagnostic::new(
            ErrorCategory::PermissionError,
            "Permission denied",
            vec![
                "Check file/directory permissions".to_string(),
                "Ensure the output directory is writable".to_string(),
                "Close any running instance of the program being rebuilt".to_string(),
            ],
        ));
    }

    None
}

fn check_disk_space_errors(output: &str) -> Option<Diagnostic> {
    if output.contains("No space left on device") || output.contains("ENOSPC") {
        return Some(Diagnostic::new(
            ErrorCategory::DiskSpaceError,
            "Insufficient disk space",
            vec![
                "Free up disk space on your system".to_string(),
                "Remove the build/ directory".to_string(),
                "Check disk usage: df -h (Linux/macOS) or dir (Windows)".to_string(),
            ],
        ));
    }

    None
}
