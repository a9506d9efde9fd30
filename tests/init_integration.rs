use filetime::FileTime;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use walkdir::WalkDir;

fn run_init<I, S>(cwd: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_workspace-init"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("run workspace-init")
}

fn snapshot(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("walk entry").into_path())
        .collect()
}

#[test]
fn creates_relative_paths_and_skips_outside_absolute_paths() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let outside = temp_dir.path().join("outside/dir");

    let output = run_init(
        temp_dir.path(),
        [
            OsStr::new("/etc/passwd"),
            OsStr::new("relative/out"),
            outside.as_os_str(),
        ],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    assert!(temp_dir.path().join("relative/out").is_dir());
    assert!(!temp_dir.path().join("outside").exists());
}

#[test]
fn skipped_paths_leave_the_tree_untouched() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp_dir.path().join("existing")).expect("create existing");
    let before = snapshot(temp_dir.path());

    let output = run_init(
        temp_dir.path(),
        [
            temp_dir.path().join("a/b"),
            temp_dir.path().join("existing/../c"),
        ],
    );

    assert!(output.status.success());
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn rerun_leaves_existing_directories_unchanged() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let parent = temp_dir.path().join("data");
    let leaf = parent.join("cache");

    assert!(run_init(temp_dir.path(), ["data/cache"]).status.success());
    let parent_mtime = FileTime::from_last_modification_time(&fs::metadata(&parent).expect("stat"));
    let leaf_mtime = FileTime::from_last_modification_time(&fs::metadata(&leaf).expect("stat"));
    let before = snapshot(temp_dir.path());

    let output = run_init(temp_dir.path(), ["data/cache", "./data//cache/"]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(snapshot(temp_dir.path()), before);
    assert_eq!(
        FileTime::from_last_modification_time(&fs::metadata(&parent).expect("stat")),
        parent_mtime
    );
    assert_eq!(
        FileTime::from_last_modification_time(&fs::metadata(&leaf).expect("stat")),
        leaf_mtime
    );
}

#[test]
fn file_collision_fails_before_later_arguments() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    fs::write(temp_dir.path().join("x"), b"regular file").expect("write file");

    let output = run_init(temp_dir.path(), ["x", "after"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to mkdir \"x\""), "stderr: {stderr}");
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(temp_dir.path().join("x").is_file());
    assert!(!temp_dir.path().join("after").exists());
}

#[test]
fn empty_argument_is_a_successful_no_op() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let before = snapshot(temp_dir.path());

    let output = run_init(temp_dir.path(), [""]);

    assert!(output.status.success());
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn no_arguments_succeeds_silently() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");

    let output = run_init(temp_dir.path(), std::iter::empty::<&str>());

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn hyphen_leading_arguments_are_paths() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");

    let output = run_init(temp_dir.path(), ["-v", "--help"]);

    assert!(output.status.success());
    assert!(temp_dir.path().join("-v").is_dir());
    assert!(temp_dir.path().join("--help").is_dir());
}

#[test]
fn double_dash_arguments_are_paths() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");

    let output = run_init(temp_dir.path(), ["--", "after", "--"]);

    assert!(output.status.success());
    assert!(temp_dir.path().join("--").is_dir());
    assert!(temp_dir.path().join("after").is_dir());
}

#[test]
fn fatal_diagnostic_ignores_rust_log() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    fs::write(temp_dir.path().join("x"), b"regular file").expect("write file");

    let output = Command::new(env!("CARGO_BIN_EXE_workspace-init"))
        .arg("x")
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .output()
        .expect("run workspace-init");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to mkdir \"x\""), "stderr: {stderr}");
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
}

#[test]
fn success_stays_silent_with_verbose_rust_log() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_workspace-init"))
        .args(["made", "/etc/passwd"])
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "trace")
        .output()
        .expect("run workspace-init");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(temp_dir.path().join("made").is_dir());
}

// macOS filesystems reject names that are not valid UTF-8.
#[cfg(target_os = "linux")]
#[test]
fn non_utf8_arguments_are_created() {
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let name = OsStr::from_bytes(&[b'a', 0xff]);

    let output = run_init(temp_dir.path(), [name, OsStr::new("later")]);

    assert!(output.status.success());
    assert!(temp_dir.path().join(name).is_dir());
    assert!(temp_dir.path().join("later").is_dir());
}
