//! CLI integration tests for Slipway.
//!
//! These tests drive the full pipeline against a stub compiler script (via
//! `CC`) so they run without a real toolchain. The stub emits an object and
//! a Makefile-style depfile listing the `#include "..."` headers of the
//! source, which is all the orchestrator observes from a real compiler.

#![cfg(unix)]

use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const STUB_CC: &str = r#"#!/bin/sh
obj=""; dep=""; src=""
prev=""
for a in "$@"; do
  case "$prev" in
    -o) obj="$a" ;;
    -MF) dep="$a" ;;
  esac
  case "$a" in
    *.c) src="$a" ;;
  esac
  prev="$a"
done
[ -n "$obj" ] && echo compiled > "$obj"
if [ -n "$dep" ]; then
  hdrs=""
  dir=$(dirname "$src")
  for h in $(sed -n 's/#include "\(.*\)"/\1/p' "$src" 2>/dev/null); do
    hdrs="$hdrs $dir/$h"
  done
  echo "$obj: $src$hdrs" > "$dep"
fi
"#;

const FAILING_CC: &str = r#"#!/bin/sh
case "$*" in
  *-c*) echo "stub: unit broke" >&2; exit 1 ;;
esac
exit 0
"#;

/// Get the slipway binary command, pointed at a project with a stub CC.
fn slipway(project: &Project) -> Command {
    let mut cmd = Command::cargo_bin("slipway").unwrap();
    cmd.current_dir(&project.root).env("CC", &project.cc);
    cmd
}

struct Project {
    _tmp: TempDir,
    root: PathBuf,
    cc: PathBuf,
}

/// Create a project with `a.c` (includes `x.h`) and `b.c`.
fn project_with(cc_script: &str) -> Project {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(
        root.join("Slipway.toml"),
        "[package]\nname = \"app\"\n\n[build]\nsources = [\"src/*.c\"]\nheaders = [\"src/*.h\"]\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/a.c"), "#include \"x.h\"\nint a;\n").unwrap();
    fs::write(root.join("src/b.c"), "int b;\n").unwrap();
    fs::write(root.join("src/x.h"), "extern int x;\n").unwrap();

    let cc = root.join("stub-cc");
    fs::write(&cc, cc_script).unwrap();
    fs::set_permissions(&cc, fs::Permissions::from_mode(0o755)).unwrap();

    Project {
        _tmp: tmp,
        root,
        cc,
    }
}

fn project() -> Project {
    project_with(STUB_CC)
}

/// Bump a file's mtime well past any artifact written so far.
fn touch_future(path: &Path) {
    let when = SystemTime::now() + Duration::from_secs(10);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when)
        .unwrap();
}

fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}

// ============================================================================
// slipway build
// ============================================================================

#[test]
fn test_build_produces_target() {
    let p = project();

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 compiled"));

    assert!(p.root.join("build/debug/app").exists());
}

#[test]
fn test_second_build_is_a_no_op() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Up to date"));
}

#[test]
fn test_plan_empty_after_clean_build() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    slipway(&p)
        .args(["build", "--plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"compiles\": []"))
        .stdout(predicate::str::contains("\"link\": null"));
}

#[test]
fn test_touching_source_recompiles_only_that_unit() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    let obj_dir = p.root.join("build/debug/obj");
    let b_obj = fs::read_dir(&obj_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|f| f.file_name().unwrap().to_string_lossy().starts_with("b-"))
        .unwrap();
    let b_before = mtime(&b_obj);

    touch_future(&p.root.join("src/a.c"));

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 compiled"));

    // b.c stayed untouched.
    assert_eq!(mtime(&b_obj), b_before);
}

#[test]
fn test_touching_header_recompiles_dependents() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    touch_future(&p.root.join("src/x.h"));

    // Only a.c depends on x.h.
    slipway(&p)
        .args(["build", "--plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.c"))
        .stdout(predicate::str::contains("b.c").not());

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 compiled"));
}

#[test]
fn test_deleted_record_recompiles_that_unit() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    let deps_dir = p.root.join("build/debug/deps");
    let a_record = fs::read_dir(&deps_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|f| f.file_name().unwrap().to_string_lossy().starts_with("a-"))
        .unwrap();
    fs::remove_file(&a_record).unwrap();

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 compiled"));
}

#[test]
fn test_release_variant_builds_separate_tree() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    slipway(&p)
        .args(["build", "--variant", "release"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 compiled"));

    assert!(p.root.join("build/debug/app").exists());
    assert!(p.root.join("build/release/app").exists());
}

#[test]
fn test_variant_from_environment() {
    let p = project();

    slipway(&p)
        .arg("build")
        .env("SLIPWAY_VARIANT", "release")
        .assert()
        .success();

    assert!(p.root.join("build/release/app").exists());
    assert!(!p.root.join("build/debug/app").exists());
}

#[test]
fn test_unknown_variant_is_a_config_error() {
    let p = project();

    slipway(&p)
        .args(["build", "--variant", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown build variant"));

    // Rejected before any action ran.
    assert!(!p.root.join("build").exists());
}

#[test]
fn test_unknown_lto_toggle_is_a_config_error() {
    let p = project();

    slipway(&p)
        .args(["build", "--lto", "thin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown lto setting"));
}

#[test]
fn test_compile_failure_halts_before_link() {
    let p = project_with(FAILING_CC);

    slipway(&p)
        .arg("build")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unit broke"));

    assert!(!p.root.join("build/debug/app").exists());
}

#[test]
fn test_compile_failure_leaves_existing_target_alone() {
    let p = project();

    slipway(&p).arg("build").assert().success();
    let target = p.root.join("build/debug/app");
    let before = mtime(&target);

    // Break a source, swap in the failing compiler.
    touch_future(&p.root.join("src/a.c"));
    fs::write(&p.cc, FAILING_CC).unwrap();

    slipway(&p).arg("build").assert().code(3);

    assert_eq!(mtime(&target), before);
}

#[test]
fn test_build_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    Command::cargo_bin("slipway")
        .unwrap()
        .current_dir(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Slipway.toml"));
}

// ============================================================================
// slipway clean
// ============================================================================

#[test]
fn test_clean_then_build_is_a_first_build() {
    let p = project();

    slipway(&p).arg("build").assert().success();
    assert!(p.root.join("build").exists());

    slipway(&p)
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
    assert!(!p.root.join("build").exists());

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 compiled"));
}

#[test]
fn test_clean_without_artifacts_succeeds() {
    let p = project();

    slipway(&p).arg("clean").assert().success();
}

// ============================================================================
// slipway format
// ============================================================================

#[test]
fn test_format_mirrors_formatter_exit() {
    let p = project();

    let formatter = p.root.join("stub-format");
    fs::write(&formatter, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&formatter, fs::Permissions::from_mode(0o755)).unwrap();

    slipway(&p)
        .arg("format")
        .env("SLIPWAY_FORMAT", &formatter)
        .assert()
        .code(7);
}

#[test]
fn test_format_never_marks_anything_stale() {
    let p = project();

    slipway(&p).arg("build").assert().success();

    let formatter = p.root.join("stub-format");
    fs::write(&formatter, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&formatter, fs::Permissions::from_mode(0o755)).unwrap();

    slipway(&p)
        .arg("format")
        .env("SLIPWAY_FORMAT", &formatter)
        .assert()
        .success();

    slipway(&p)
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Up to date"));
}
