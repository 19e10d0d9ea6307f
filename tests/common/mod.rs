//! Common test utilities for jscc integration tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch project plus a fake toolchain install for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory holding everything
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project directory containing the target file and closure.json
    pub path: PathBuf,
    /// Fake install root (passed as JSCC_ROOT)
    pub root: PathBuf,
    /// Fake base library root (configured as closureBasePath)
    pub base: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a project dir, a fake install root with `lib/`, `bin/` and
    /// `third_party/`, and a fake base library with the build-tool
    /// directory layout the real toolchain uses.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");

        let path = temp.path().join("project");
        fs::create_dir_all(&path).expect("Failed to create project directory");

        let root = temp.path().join("jscc-root");
        fs::create_dir_all(root.join("lib")).expect("Failed to create lib directory");
        fs::create_dir_all(root.join("bin")).expect("Failed to create bin directory");
        fs::create_dir_all(root.join("third_party"))
            .expect("Failed to create third_party directory");
        fs::write(root.join("lib/node.externs.js"), "var process;\n")
            .expect("Failed to write externs");
        fs::write(root.join("lib/node.static.externs.js"), "var require;\n")
            .expect("Failed to write static externs");
        fs::write(root.join("third_party/compiler.jar"), "").expect("Failed to write jar");

        let base = temp.path().join("closure-library");
        fs::create_dir_all(base.join("closure/bin/build"))
            .expect("Failed to create build-tool directory");
        fs::create_dir_all(base.join("closure/goog")).expect("Failed to create goog directory");
        fs::write(base.join("closure/goog/deps.js"), "").expect("Failed to write goog deps");

        let project = Self {
            temp,
            path,
            root,
            base,
        };
        project.write_settings("");
        project
    }

    /// Write closure.json pointing at the fake base library, with
    /// optional extra JSON fields appended.
    pub fn write_settings(&self, extra_fields: &str) {
        let mut json = format!(r#"{{"closureBasePath": "{}""#, self.base.display());
        if !extra_fields.is_empty() {
            json.push(',');
            json.push_str(extra_fields);
        }
        json.push('}');
        fs::write(self.path.join("closure.json"), json).expect("Failed to write settings");
    }

    /// Write the target file in the project directory
    pub fn write_target(&self, name: &str, content: &str) -> PathBuf {
        let target = self.path.join(name);
        fs::write(&target, content).expect("Failed to write target file");
        target
    }

    /// Install a stub build tool (sh script body) under the fake base
    /// library's build-tool directory.
    #[cfg(unix)]
    pub fn write_tool(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let tool = self.base.join("closure/bin/build").join(name);
        fs::write(&tool, format!("#!/bin/sh\n{body}")).expect("Failed to write stub tool");
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub tool executable");
    }

    /// Read a file from the project directory
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path.join(name)).expect("Failed to read file")
    }

    /// Check if a file exists in the project directory
    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }

    /// Command for the real jscc binary, run from the project directory
    /// with the fake install root.
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("jscc").expect("Failed to locate jscc binary");
        cmd.current_dir(&self.path).env("JSCC_ROOT", &self.root);
        cmd
    }
}
