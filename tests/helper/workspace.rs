//! Temporary workflow directory utilities

use std::path::PathBuf;

use tempfile::TempDir;

pub const CHECKOUT_SHA: &str = "11bd71901bbe5b1630ceea73d27597364c9af683";
pub const SETUP_NODE_SHA: &str = "49933ea5288caeca8642d1e84afbd3f7d6820020";
pub const CACHE_SHA: &str = "5a3ec84eff668545956fd18022155c47e93e2684";
pub const OLD_SHA: &str = "b4ffde65f46336ab88eb53be808477a3936bae11";

/// A temp directory laid out like `.github/workflows`
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join(".github/workflows"))
            .expect("Failed to create workflows dir");
        Self { dir }
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.dir.path().join(".github/workflows")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.workflows_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write workflow");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.workflows_dir().join(name)).expect("Failed to read workflow")
    }
}
