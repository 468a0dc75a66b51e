//! Go build constraints
//!
//! A file belongs to a package on a platform only if its `_GOOS`/`_GOARCH`
//! name suffix and its `//go:build` line both hold there. The `gc` tag and
//! release tags (`go1.N`) always hold; custom tags such as `ignore` never do.

use std::io::{self, BufRead};

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Target platform that constraints are evaluated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    goos: String,
    goarch: String,
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
        }
    }

    /// The platform this process runs on, in Go's naming
    pub fn host() -> Self {
        Self::new(host_goos(), host_goarch())
    }

    pub fn goos(&self) -> &str {
        &self.goos
    }

    pub fn goarch(&self) -> &str {
        &self.goarch
    }

    /// Whether a single build tag holds on this platform
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "gc" => true,
            _ => is_release_tag(tag),
        }
    }

    /// Whether the `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix of a file
    /// name allows it on this platform
    ///
    /// Only the part after the first `_` counts, so `linux.go` is
    /// unconstrained.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.strip_suffix(".go").unwrap_or(file_name);
        let Some(underscore) = stem.find('_') else {
            return true;
        };

        let mut parts: Vec<&str> = stem[underscore..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }

        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 2]) && self.matches_tag(parts[n - 1]);
        }
        match parts.last() {
            Some(last) if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.matches_tag(last)
            }
            _ => true,
        }
    }

    /// Whether the constraint lines in the header of a Go file hold
    ///
    /// Scanning stops at the first line that is not blank or a comment. A
    /// `//go:build` line takes precedence over `// +build` lines. A
    /// malformed `//go:build` expression leaves the file in.
    pub fn matches_source<R: BufRead>(&self, reader: R) -> io::Result<bool> {
        let mut go_build: Option<String> = None;
        let mut plus_build: Vec<String> = Vec::new();
        let mut in_block_comment = false;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if in_block_comment {
                if line.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if line.starts_with("/*") {
                in_block_comment = !line.contains("*/");
                continue;
            }
            let Some(comment) = line.strip_prefix("//") else {
                break;
            };

            if let Some(expr) = comment.strip_prefix("go:build") {
                if go_build.is_none() && starts_with_space(expr) {
                    go_build = Some(expr.trim().to_string());
                }
            } else if let Some(terms) = comment.trim_start().strip_prefix("+build") {
                if starts_with_space(terms) {
                    plus_build.push(terms.trim().to_string());
                }
            }
        }

        if let Some(expr) = go_build {
            return Ok(self.matches_expression(&expr).unwrap_or(true));
        }
        Ok(plus_build.iter().all(|line| self.matches_plus_build(line)))
    }

    /// Evaluate a `//go:build` expression; `None` when it does not parse
    pub fn matches_expression(&self, expr: &str) -> Option<bool> {
        let tokens = tokenize(expr)?;
        let mut parser = ExprParser {
            tokens: &tokens,
            pos: 0,
            context: self,
        };
        let value = parser.or()?;
        (parser.pos == tokens.len()).then_some(value)
    }

    /// Space-separated options are OR'ed, comma-separated terms AND'ed
    fn matches_plus_build(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !self.matches_tag(tag),
                None => self.matches_tag(term),
            })
        })
    }
}

fn starts_with_space(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')
}

fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .map(|minor| !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    let little = cfg!(target_endian = "little");
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if little => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if little => "mipsle",
        "mips64" if little => "mips64le",
        "wasm32" => "wasm",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Not,
    And,
    Or,
    Open,
    Close,
    Tag(String),
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '&' | '|' => {
                chars.next();
                if chars.next() != Some(c) {
                    return None;
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut tag = String::new();
                while let Some(&c) = chars.peek() {
                    if !(c.is_alphanumeric() || c == '_' || c == '.') {
                        break;
                    }
                    tag.push(c);
                    chars.next();
                }
                tokens.push(Token::Tag(tag));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    context: &'a BuildContext,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.and()?;
            value = value || rhs;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.not()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.not()?;
            value = value && rhs;
        }
        Some(value)
    }

    fn not(&mut self) -> Option<bool> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            return self.not().map(|v| !v);
        }
        self.atom()
    }

    fn atom(&mut self) -> Option<bool> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        match token {
            Token::Open => {
                let value = self.or()?;
                if self.peek() != Some(&Token::Close) {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            Token::Tag(tag) => Some(self.context.matches_tag(&tag)),
            _ => None,
        }
    }
}
