use crate::models::ImportSet;
use std::collections::HashSet;
use std::sync::OnceLock;

/// CPython standard-library module names.
///
/// Pinned enumeration of what `sys.stdlib_module_names` reports on a
/// current 3.x interpreter; no network or heuristic lookup happens here.
const PYTHON_STDLIB: &[&str] = &[
    // Core
    "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio",
    "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
    "binhex", "bisect", "builtins", "bz2",
    // C-Z
    "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code",
    "codecs", "codeop", "collections", "colorsys", "compileall",
    "concurrent", "configparser", "contextlib", "contextvars", "copy",
    "copyreg", "cProfile", "crypt", "csv", "ctypes", "curses",
    // D-E
    "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis",
    "distutils", "doctest", "email", "encodings", "enum", "errno",
    // F-G
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch",
    "fractions", "ftplib", "functools", "gc", "getopt", "getpass",
    "gettext", "glob", "graphlib", "grp", "gzip",
    // H-I
    "hashlib", "heapq", "hmac", "html", "http", "idlelib", "imaplib",
    "imghdr", "imp", "importlib", "inspect", "io", "ipaddress",
    "itertools",
    // J-L
    "json", "keyword", "lib2to3", "linecache", "locale", "logging",
    "lzma",
    // M-N
    "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
    "modulefinder", "multiprocessing", "netrc", "nis", "nntplib",
    "numbers",
    // O-P
    "operator", "optparse", "os", "ossaudiodev", "pathlib", "pdb",
    "pickle", "pickletools", "pipes", "pkgutil", "platform", "plistlib",
    "poplib", "posix", "posixpath", "pprint", "profile", "pstats",
    "pty", "pwd", "py_compile", "pyclbr", "pydoc",
    // Q-R
    "queue", "quopri", "random", "re", "readline", "reprlib",
    "resource", "rlcompleter", "runpy",
    // S
    "sched", "secrets", "select", "selectors", "shelve", "shlex",
    "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr",
    "socket", "socketserver", "spwd", "sqlite3", "ssl", "stat",
    "statistics", "string", "stringprep", "struct", "subprocess",
    "sunau", "symtable", "sys", "sysconfig", "syslog",
    // T
    "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test",
    "textwrap", "threading", "time", "timeit", "tkinter", "token",
    "tokenize", "trace", "traceback", "tracemalloc", "tty", "turtle",
    "turtledemo", "types", "typing",
    // U-Z
    "unicodedata", "unittest", "urllib", "uu", "uuid", "venv",
    "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound",
    "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile",
    "zipimport", "zlib", "zoneinfo",
    // Underscore prefixed (internal but commonly used)
    "_thread",
];

/// Reserved dunder-style module markers, never real dependencies.
const IGNORED_MODULES: &[&str] = &["__future__", "__main__"];

fn stdlib_modules() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| PYTHON_STDLIB.iter().copied().collect())
}

pub fn is_stdlib_module(name: &str) -> bool {
    stdlib_modules().contains(name)
}

pub fn is_ignored_module(name: &str) -> bool {
    IGNORED_MODULES.contains(&name)
}

/// Pure set difference: keep only names that plausibly correspond to
/// externally-installed packages.
///
/// First-party package names living in the scanned tree are not
/// subtracted and will pass through.
pub fn filter_third_party(imports: &ImportSet) -> ImportSet {
    imports
        .iter()
        .filter(|name| !is_stdlib_module(name) && !is_ignored_module(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_names_are_removed() {
        let imports = ImportSet::from([
            "os".to_string(),
            "sys".to_string(),
            "collections".to_string(),
            "requests".to_string(),
        ]);
        assert_eq!(
            filter_third_party(&imports),
            ImportSet::from(["requests".to_string()])
        );
    }

    #[test]
    fn test_ignored_markers_are_removed() {
        let imports = ImportSet::from(["__future__".to_string(), "__main__".to_string()]);
        assert!(filter_third_party(&imports).is_empty());
    }

    #[test]
    fn test_filter_is_a_subset() {
        let imports = ImportSet::from([
            "json".to_string(),
            "flask".to_string(),
            "numpy".to_string(),
            "pathlib".to_string(),
        ]);
        let filtered = filter_third_party(&imports);
        assert!(filtered.is_subset(&imports));
        assert!(filtered.iter().all(|name| !is_stdlib_module(name)));
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_third_party(&ImportSet::new()).is_empty());
    }

    #[test]
    fn test_unknown_names_pass_through() {
        // A local first-party package name is not recognized and survives
        let imports = ImportSet::from(["my_local_pkg".to_string()]);
        assert_eq!(filter_third_party(&imports), imports);
    }
}
