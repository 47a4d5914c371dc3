use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::license::LicenseTable;
use crate::models::{Category, Dialect};

/// Directory names excluded from the local-module index
const INDEX_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".ipynb_checkpoints",
    "node_modules",
    "dist",
    "build",
    "target",
];

/// Python standard library module names (union across maintained 3.x
/// versions; removed modules stay listed so older sources still classify)
const PYTHON_STDLIB: &[&str] = &[
    "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio", "asyncore", "atexit",
    "audioop", "base64", "bdb", "binascii", "bisect", "builtins", "bz2", "calendar", "cgi",
    "cgitb", "chunk", "cmath", "cmd", "code", "codecs", "codeop", "collections", "colorsys",
    "compileall", "concurrent", "configparser", "contextlib", "contextvars", "copy", "copyreg",
    "cProfile", "crypt", "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal",
    "difflib", "dis", "distutils", "doctest", "email", "encodings", "enum", "errno",
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "fractions", "ftplib",
    "functools", "gc", "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "imaplib", "imghdr", "imp", "importlib",
    "inspect", "io", "ipaddress", "itertools", "json", "keyword", "linecache", "locale",
    "logging", "lzma", "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
    "modulefinder", "multiprocessing", "netrc", "nntplib", "numbers", "operator", "optparse",
    "os", "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil", "platform", "plistlib",
    "poplib", "posix", "posixpath", "pprint", "profile", "pstats", "pty", "pwd", "py_compile",
    "pyclbr", "pydoc", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
    "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex",
    "shutil", "signal", "site", "smtplib", "socket", "socketserver", "sqlite3", "ssl", "stat",
    "statistics", "string", "stringprep", "struct", "subprocess", "symtable", "sys",
    "sysconfig", "syslog", "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test",
    "textwrap", "threading", "time", "timeit", "tkinter", "token", "tokenize", "tomllib",
    "trace", "traceback", "tracemalloc", "tty", "turtle", "types", "typing", "unicodedata",
    "unittest", "urllib", "uu", "uuid", "warnings", "wave", "weakref", "webbrowser", "winreg",
    "winsound", "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib",
    "zoneinfo", "_thread", "__future__",
];

/// C and C++ standard headers as spelled in include directives
const STANDARD_HEADERS: &[&str] = &[
    // C++ library headers
    "algorithm", "any", "array", "atomic", "barrier", "bit", "bitset", "charconv", "chrono",
    "codecvt", "compare", "complex", "concepts", "condition_variable", "coroutine", "deque",
    "exception", "execution", "expected", "filesystem", "format", "forward_list", "fstream",
    "functional", "future", "initializer_list", "iomanip", "ios", "iosfwd", "iostream",
    "istream", "iterator", "latch", "limits", "list", "locale", "map", "memory",
    "memory_resource", "mutex", "new", "numbers", "numeric", "optional", "ostream", "queue",
    "random", "ranges", "ratio", "regex", "scoped_allocator", "semaphore", "set",
    "shared_mutex", "source_location", "span", "sstream", "stack", "stdexcept", "stop_token",
    "streambuf", "string", "string_view", "syncstream", "system_error", "thread", "tuple",
    "type_traits", "typeindex", "typeinfo", "unordered_map", "unordered_set", "utility",
    "valarray", "variant", "vector", "version",
    // C compatibility headers
    "cassert", "cctype", "cerrno", "cfenv", "cfloat", "cinttypes", "climits", "clocale",
    "cmath", "csetjmp", "csignal", "cstdarg", "cstddef", "cstdint", "cstdio", "cstdlib",
    "cstring", "ctime", "cuchar", "cwchar", "cwctype",
    // Classic C headers
    "assert.h", "complex.h", "ctype.h", "errno.h", "fenv.h", "float.h", "inttypes.h",
    "iso646.h", "limits.h", "locale.h", "math.h", "setjmp.h", "signal.h", "stdalign.h",
    "stdarg.h", "stdatomic.h", "stdbool.h", "stddef.h", "stdint.h", "stdio.h", "stdlib.h",
    "string.h", "tgmath.h", "threads.h", "time.h", "uchar.h", "wchar.h", "wctype.h",
];

/// Assigns categories to reference tokens.
///
/// Classification is a pure function of the token, its dialect, the
/// local-module index computed at construction, and the injected license
/// table. Nothing here mutates during a scan, so the same token always gets
/// the same category within one pass.
pub struct TokenClassifier {
    python_stdlib: HashSet<&'static str>,
    std_headers: HashSet<&'static str>,
    local_modules: HashSet<String>,
    table: LicenseTable,
}

impl TokenClassifier {
    /// Build a classifier for the given scan root. The root is walked once
    /// to index local module names; the license table is injected rather
    /// than loaded here so tests can supply synthetic tables.
    pub fn new(root: &Path, table: LicenseTable) -> Self {
        Self::with_local_modules(index_local_modules(root), table)
    }

    pub fn with_local_modules(local_modules: HashSet<String>, table: LicenseTable) -> Self {
        Self {
            python_stdlib: PYTHON_STDLIB.iter().copied().collect(),
            std_headers: STANDARD_HEADERS.iter().copied().collect(),
            local_modules,
            table,
        }
    }

    /// The license table this classifier was built with
    pub fn license_table(&self) -> &LicenseTable {
        &self.table
    }

    /// First match wins; comparisons are case-sensitive throughout.
    pub fn classify(&self, name: &str, dialect: Dialect) -> Category {
        match dialect {
            Dialect::Python | Dialect::Notebook => self.classify_scripting(name),
            Dialect::Header => self.classify_header(name),
        }
    }

    fn classify_scripting(&self, name: &str) -> Category {
        if self.python_stdlib.contains(name) {
            return Category::StandardLibrary;
        }
        // A same-named module or package under the scan root is evidence the
        // import is intra-project
        if self.local_modules.contains(name) {
            return Category::LocalOrMissing;
        }
        if self.table.contains(name) {
            return Category::ThirdParty;
        }
        Category::Unknown
    }

    fn classify_header(&self, name: &str) -> Category {
        if self.std_headers.contains(name) {
            return Category::StandardLibrary;
        }
        if name.contains('/') || name.contains('\\') || name.ends_with(".h") || name.ends_with(".hpp")
        {
            return Category::LocalOrThirdParty;
        }
        Category::Unknown
    }
}

/// Collect the names that count as "local": `*.py` file stems and directory
/// names anywhere under the root, minus dependency and cache directories.
/// For a single-file root the containing directory is indexed instead.
fn index_local_modules(root: &Path) -> HashSet<String> {
    let index_root = if root.is_file() {
        match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => return HashSet::new(),
        }
    } else {
        root.to_path_buf()
    };

    let mut modules = HashSet::new();
    let walker = WalkDir::new(&index_root).min_depth(1).into_iter();

    for entry in walker.filter_entry(|e| {
        let name = e.file_name().to_string_lossy();
        !(e.file_type().is_dir() && INDEX_EXCLUDED_DIRS.contains(&name.as_ref()))
    }) {
        let Ok(entry) = entry else { continue };

        if entry.file_type().is_dir() {
            modules.insert(entry.file_name().to_string_lossy().into_owned());
        } else if entry.path().extension().is_some_and(|ext| ext == "py") {
            if let Some(stem) = entry.path().file_stem() {
                modules.insert(stem.to_string_lossy().into_owned());
            }
        }
    }

    modules
}
