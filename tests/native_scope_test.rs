//! Native mod loading against a real shared library
//! Run with: cargo test --test native_scope_test
//!
//! The mod under tests/fixtures/native-mod is built once per run with the
//! same cargo that runs the tests.

use std::env::consts::{DLL_EXTENSION, DLL_PREFIX, DLL_SUFFIX};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use mod_bootstrap::application::errors::ScopeError;
use mod_bootstrap::infrastructure::archive::MANIFEST_PATH;
use mod_bootstrap::infrastructure::scope::NativeScope;
use mod_bootstrap::{Bootstrap, CodeScope, DisabledSet, Mountable, MountOutcome};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn fixture_library() -> &'static Path {
    static LIBRARY: OnceLock<PathBuf> = OnceLock::new();
    LIBRARY.get_or_init(|| {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("native-mod")
            .join("Cargo.toml");
        let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("native-fixture");
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());

        let status = Command::new(cargo)
            .args(["build", "--quiet", "--manifest-path"])
            .arg(&manifest)
            .arg("--target-dir")
            .arg(&target_dir)
            .status()
            .expect("Should run cargo");
        assert!(status.success(), "native fixture failed to build");

        target_dir
            .join("debug")
            .join(format!("{}native_fixture{}", DLL_PREFIX, DLL_SUFFIX))
    })
}

fn library_entry(name: &str) -> String {
    format!("native/{}.{}", name, DLL_EXTENSION)
}

fn write_bundle(
    dir: &Path,
    name: &str,
    manifest: &str,
    libraries: &[(String, Vec<u8>)],
) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    zip.start_file(MANIFEST_PATH, SimpleFileOptions::default()).unwrap();
    zip.write_all(manifest.as_bytes()).unwrap();
    for (entry, data) in libraries {
        zip.start_file(entry.as_str(), SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn mount_count(library: &Path) -> u32 {
    unsafe {
        let lib = libloading::Library::new(library).unwrap();
        let count: libloading::Symbol<unsafe extern "C" fn() -> u32> =
            lib.get(b"native_fixture_cool_mounts").unwrap();
        count()
    }
}

#[test]
fn test_native_mods_are_mounted_with_every_outcome() {
    let library = fs::read(fixture_library()).unwrap();
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("code-mods");
    fs::create_dir_all(&dir).unwrap();

    // Only cool-mod.jar ships code; the other bundles resolve their entry
    // types from it, including bad.jar which is processed before it.
    write_bundle(
        &dir,
        "cool-mod.jar",
        "Main-Class: com.example.Cool\nName: Cool Mod\n",
        &[(library_entry("cool"), library)],
    );
    write_bundle(&dir, "bad.jar", "Main-Class: com.example.Bad\nName: Bad\n", &[]);
    write_bundle(
        &dir,
        "panicky.jar",
        "Main-Class: com.example.Panicky\nName: Panicky\n",
        &[],
    );
    write_bundle(&dir, "plain.jar", "Main-Class: com.example.Plain\nName: Plain\n", &[]);

    let scope = NativeScope::new(root.path().join(".mod-cache"));
    let mut bootstrap =
        Bootstrap::new(scope, &dir, DisabledSet::default()).with_sorted_bundles(true);
    let report = bootstrap.run();

    assert!(report.issues.is_empty(), "{:?}", report.issues);
    assert_eq!(report.outcome("Cool Mod"), Some(&MountOutcome::Mounted));
    assert_eq!(
        report.outcome("Bad"),
        Some(&MountOutcome::Failed("mount hook returned status 3".to_string()))
    );
    assert_eq!(
        report.outcome("Panicky"),
        Some(&MountOutcome::Failed("mount hook returned status 2".to_string()))
    );
    assert_eq!(report.outcome("Plain"), Some(&MountOutcome::NotMountable));

    let opened = bootstrap.scope().library_paths();
    assert_eq!(opened.len(), 1);
    assert_eq!(mount_count(opened[0]), 1);
}

#[test]
fn test_partially_opened_bundle_is_not_unpacked_again() {
    let library = fs::read(fixture_library()).unwrap();
    let root = tempfile::tempdir().unwrap();
    let bundle = write_bundle(
        root.path(),
        "half.jar",
        "Main-Class: com.example.Cool\n",
        &[
            (library_entry("a-good"), library),
            (library_entry("z-broken"), b"not a library".to_vec()),
        ],
    );

    let mut scope = NativeScope::new(root.path().join(".mod-cache"));
    let err = scope.extend(&bundle).unwrap_err();
    assert!(matches!(err, ScopeError::Library { .. }));
    assert_eq!(scope.library_paths().len(), 1);

    let opened = scope.library_paths()[0].to_path_buf();
    let before = fs::metadata(&opened).unwrap().modified().unwrap();

    scope.extend(&bundle).unwrap();
    assert_eq!(scope.library_paths().len(), 1);
    assert_eq!(fs::metadata(&opened).unwrap().modified().unwrap(), before);

    let entry = scope.resolve("com.example.Cool").unwrap();
    entry.mount_hook().unwrap().mount().unwrap();
    assert_eq!(mount_count(&opened), 1);
}

#[test]
fn test_extend_twice_keeps_types_resolvable() {
    let library = fs::read(fixture_library()).unwrap();
    let root = tempfile::tempdir().unwrap();
    let bundle = write_bundle(
        root.path(),
        "cool-mod.jar",
        "Main-Class: com.example.Cool\n",
        &[(library_entry("cool"), library)],
    );

    let mut scope = NativeScope::new(root.path().join(".mod-cache"));
    scope.extend(&bundle).unwrap();
    assert!(scope.resolve("com.example.Cool").is_ok());

    scope.extend(&bundle).unwrap();
    assert_eq!(scope.library_paths().len(), 1);
    assert!(scope.resolve("com.example.Cool").is_ok());
    assert!(scope.resolve("com.example.Missing").is_err());
}
