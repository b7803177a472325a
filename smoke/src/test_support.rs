//! Test-only helpers for building scratch playground projects.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const VALID_INDEX_HTML: &str = r#"<!doctype html>
<html>
  <body>
    <div id="instructions-content"></div>
    <textarea id="code"></textarea>
    <button id="run">Run</button>
    <pre id="terminal-output"></pre>
  </body>
</html>
"#;

pub const VALID_MAIN_JS: &str = "let runtimeAdapter = null\n\
async function probeRuntime() {\n  throw new Error('Runtime probe timed out')\n}\n";

pub const VALID_SAMPLE_JSON: &str = r#"{
  "id": "sample",
  "runtime": {
    "type": "micropython",
    "recommended": "https://cdn.jsdelivr.net/npm/@micropython/micropython-webassembly-pyscript/micropython.mjs"
  },
  "feedback": {
    "regex": [
      { "id": "greeting", "pattern": "^Your line was: \\w+$" }
    ]
  }
}
"#;

/// A temporary project root pre-populated with artifacts that pass every check.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> io::Result<Self> {
        let fixture = Self {
            dir: tempfile::tempdir()?,
        };
        fixture.write("src/index.html", VALID_INDEX_HTML)?;
        fixture.write("src/main.js", VALID_MAIN_JS)?;
        fixture.write("src/config/sample.json", VALID_SAMPLE_JSON)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `contents` at `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> io::Result<()> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    pub fn remove(&self, rel: &str) -> io::Result<()> {
        fs::remove_file(self.path(rel))
    }
}
