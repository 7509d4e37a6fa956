//! JSON artifacts written after each pipeline stage when `MINT_DUMP_DIR` is set.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

pub const DUMP_DIR_ENV: &str = "MINT_DUMP_DIR";

pub const TOKENS: &str = "tokens.json";
pub const ASTS: &str = "asts.json";
pub const SEMANTIC: &str = "semantic.json";
pub const INTERPRETER: &str = "interpreter.json";

const ARTIFACTS: [&str; 4] = [TOKENS, ASTS, SEMANTIC, INTERPRETER];

pub struct DumpDir {
    root: PathBuf,
}

impl DumpDir {
    /// Reads the target directory from the environment, creating it and
    /// clearing artifacts left by an earlier run.
    pub fn from_env() -> Result<Option<DumpDir>> {
        let root = match std::env::var_os(DUMP_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => return Ok(None),
        };
        fs::create_dir_all(&root).with_context(|| format!("Failed to create dump directory {}", root.display()))?;
        for name in ARTIFACTS {
            let path = root.join(name);
            if path.exists() {
                fs::remove_file(&path).with_context(|| format!("Failed to remove stale {}", path.display()))?;
            }
        }
        Ok(Some(DumpDir { root }))
    }

    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.root.join(name);
        let json = serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {}", name))?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}
