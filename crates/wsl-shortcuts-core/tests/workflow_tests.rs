//! Integration tests for the session workflow.
//!
//! A scripted subsystem stands in for `wsl.exe` and a recording writer for the
//! shortcut API, so these run on any host.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wsl_shortcuts_core::{
    ApplicationEntry, CommandOutput, CommandRunner, Config, DiscoveryMode, LaunchSpec, Notice,
    NoticeLevel, Result, Session, ShortcutError, ShortcutWriter,
};

/// Encode text the way `wsl.exe -l -v` prints it.
fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Answers the handful of commands the core issues.
struct FakeWsl {
    list_output: Option<Vec<u8>>,
    /// Manifest path and its `Name=` value, all under `/usr/share/applications`.
    manifests: Vec<(&'static str, &'static str)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeWsl {
    fn ubuntu() -> Self {
        Self {
            list_output: Some(utf16le(
                "  NAME            STATE           VERSION\r\n\
                 * Ubuntu-22.04    Running         2\r\n\
                 \x20 Debian          Stopped         2\r\n",
            )),
            manifests: vec![
                ("/usr/share/applications/org.gnome.Nautilus.desktop", "Files"),
                ("/usr/share/applications/xterm.desktop", "XTerm"),
            ],
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeWsl {
    fn run(&self, _program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.to_vec());

        if args == ["-l", "-v"] {
            return match &self.list_output {
                Some(bytes) => Ok(CommandOutput {
                    status: Some(0),
                    stdout: bytes.clone(),
                    stderr: Vec::new(),
                }),
                None => Err(ShortcutError::environment("wsl.exe not found")),
            };
        }

        match args.get(1).map(String::as_str) {
            Some("ls") if args[2].starts_with("/usr/share/applications") => {
                let listing: Vec<&str> = self.manifests.iter().map(|(p, _)| *p).collect();
                Ok(CommandOutput::ok(listing.join("\n")))
            }
            Some("ls") => Ok(CommandOutput::failed(2, "No such file or directory")),
            _ => {
                let script = args.last().map(String::as_str).unwrap_or_default();
                if script.starts_with("for f in /usr/share/applications") {
                    let lines: Vec<String> = self
                        .manifests
                        .iter()
                        .map(|(p, n)| format!("{}\t{}", p, n))
                        .collect();
                    return Ok(CommandOutput::ok(lines.join("\n")));
                }
                if script.starts_with("for f in") {
                    return Ok(CommandOutput::ok(""));
                }
                let name = self
                    .manifests
                    .iter()
                    .find(|(p, _)| script.contains(p))
                    .map(|(_, n)| format!("Name={}\n", n))
                    .unwrap_or_default();
                Ok(CommandOutput::ok(name))
            }
        }
    }
}

/// Records launch descriptions and writes them as file content.
#[derive(Default)]
struct RecordingWriter {
    written: Mutex<Vec<(LaunchSpec, PathBuf)>>,
}

impl ShortcutWriter for RecordingWriter {
    fn write(&self, spec: &LaunchSpec, dest: &Path) -> Result<()> {
        fs::write(dest, &spec.arguments).map_err(|e| ShortcutError::io_with_path(e, dest))?;
        self.written
            .lock()
            .unwrap()
            .push((spec.clone(), dest.to_path_buf()));
        Ok(())
    }
}

struct TestEnv {
    temp_dir: TempDir,
    runner: Arc<FakeWsl>,
    writer: Arc<RecordingWriter>,
    session: Session,
}

async fn start(runner: FakeWsl, mode: DiscoveryMode) -> TestEnv {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Arc::new(
        Config::builder()
            .shortcuts_root(temp_dir.path().join("Programs"))
            .icon_cache_dir(temp_dir.path().join("icons"))
            .discovery_mode(mode)
            .build()
            .unwrap(),
    );
    let runner = Arc::new(runner);
    let writer = Arc::new(RecordingWriter::default());
    let session = Session::start(config, runner.clone(), writer.clone()).await;
    TestEnv {
        temp_dir,
        runner,
        writer,
        session,
    }
}

#[tokio::test]
async fn test_full_workflow() {
    let env = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;
    let distro = env.session.distro().unwrap();
    assert_eq!(distro.name, "Ubuntu-22.04");

    let listed = env.session.list_shortcuts().await.unwrap();
    assert!(listed.folder_created);
    assert_eq!(
        Notice::from_list(&listed).message,
        "Created shortcuts folder - ready to add shortcuts"
    );

    let report = env.session.discover().await.unwrap();
    let names: Vec<&str> = report
        .entries
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Files", "XTerm"]);
    assert_eq!(report.failed_locations.len(), 2);
    assert_eq!(Notice::from_discovery(&report).message, "Found 2 WSL applications");

    let created = env.session.create(report.entries).await.unwrap();
    assert!(created.is_complete_success());
    assert_eq!(created.succeeded, 2);

    let written = env.writer.written.lock().unwrap().clone();
    let (spec, dest) = &written[0];
    assert_eq!(
        spec.arguments,
        "-d Ubuntu-22.04 --cd \"~\" -- env \
         BAMF_DESKTOP_FILE_HINT=/usr/share/applications/org.gnome.Nautilus.desktop files"
    );
    assert_eq!(spec.target, "C:\\Program Files\\WSL\\wslg.exe");
    assert_eq!(spec.icon_location(), "C:\\Program Files\\WSL\\wslg.exe,0");
    assert_eq!(spec.description, "WSL GUI Application: Files");
    assert_eq!(
        dest,
        &env.temp_dir.path().join("Programs/Ubuntu-22.04/Files.lnk")
    );

    let listed = env.session.list_shortcuts().await.unwrap();
    assert_eq!(listed.files, vec!["Files.lnk", "XTerm.lnk"]);
    assert_eq!(Notice::from_list(&listed).message, "Found 2 shortcuts");

    let removed = env
        .session
        .remove(vec!["XTerm.lnk".to_string()])
        .await
        .unwrap();
    assert_eq!(removed.succeeded, 1);
    assert_eq!(
        env.session.list_shortcuts().await.unwrap().files,
        vec!["Files.lnk"]
    );
}

#[tokio::test]
async fn test_batched_discovery_matches_per_manifest() {
    let per_manifest = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;
    let batched = start(FakeWsl::ubuntu(), DiscoveryMode::Batched).await;

    let a = per_manifest.session.discover().await.unwrap();
    let b = batched.session.discover().await.unwrap();

    assert_eq!(a.entries, b.entries);
    // One resolve plus one call per location.
    assert_eq!(batched.runner.calls().len(), 4);
    assert!(per_manifest.runner.calls().len() > batched.runner.calls().len());
}

#[tokio::test]
async fn test_missing_subsystem_disables_session() {
    let runner = FakeWsl {
        list_output: None,
        ..FakeWsl::ubuntu()
    };
    let env = start(runner, DiscoveryMode::PerManifest).await;

    assert!(env.session.distro().unwrap_err().is_environment());
    let err = env
        .session
        .create(vec![ApplicationEntry::custom("Clock", "xclock", None)])
        .await
        .unwrap_err();
    assert!(err.is_environment());
    assert!(env.writer.written.lock().unwrap().is_empty());
    assert!(!env.temp_dir.path().join("Programs").exists());
}

#[tokio::test]
async fn test_no_default_marker_disables_session() {
    let runner = FakeWsl {
        list_output: Some(utf16le(
            "  NAME      STATE      VERSION\r\n  Ubuntu    Stopped    2\r\n",
        )),
        ..FakeWsl::ubuntu()
    };
    let env = start(runner, DiscoveryMode::PerManifest).await;

    assert!(env.session.distro().is_err());
    assert!(env.session.discover().await.unwrap_err().is_environment());
}

#[tokio::test]
async fn test_custom_app_with_icon() {
    let env = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;
    let image_path = env.temp_dir.path().join("clock.png");
    image::RgbaImage::from_pixel(40, 20, image::Rgba([200, 30, 30, 255]))
        .save(&image_path)
        .unwrap();

    let outcome = env
        .session
        .add_custom("  Clock ".into(), " xclock -digital ".into(), Some(image_path))
        .await
        .unwrap();
    assert_eq!(
        Notice::from_submit(&outcome).message,
        "Custom application 'Clock' added successfully"
    );
    let icon = outcome.entry.icon_path.clone().unwrap();
    assert!(icon.starts_with(env.temp_dir.path().join("icons")));
    assert_eq!(icon.extension().unwrap(), "ico");

    env.session.create(env.session.entries().await).await.unwrap();

    let written = env.writer.written.lock().unwrap().clone();
    let (spec, _) = &written[0];
    assert_eq!(spec.arguments, "-d Ubuntu-22.04 --cd \"~\" -- xclock -digital");
    assert_eq!(spec.icon_location(), format!("{},0", icon.display()));
}

#[tokio::test]
async fn test_custom_app_with_broken_icon_is_still_added() {
    let env = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;
    let image_path = env.temp_dir.path().join("broken.png");
    fs::write(&image_path, b"not an image").unwrap();

    let outcome = env
        .session
        .add_custom("Clock".into(), "xclock".into(), Some(image_path))
        .await
        .unwrap();

    assert!(outcome.entry.icon_path.is_none());
    assert_eq!(Notice::from_submit(&outcome).level, NoticeLevel::Warning);
    assert_eq!(env.session.entries().await.len(), 1);
}

#[tokio::test]
async fn test_custom_app_requires_name_and_command() {
    let env = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;

    let err = env
        .session
        .add_custom("   ".into(), "".into(), None)
        .await
        .unwrap_err();

    match &err {
        ShortcutError::Validation { fields } => assert_eq!(fields, &["name", "command"]),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(
        Notice::from_error(&err).message,
        "Application name and command are required"
    );
    assert!(env.session.entries().await.is_empty());
}

#[tokio::test]
async fn test_remove_reports_missing_files() {
    let env = start(FakeWsl::ubuntu(), DiscoveryMode::PerManifest).await;
    env.session
        .create(vec![
            ApplicationEntry::custom("A", "a", None),
            ApplicationEntry::custom("B", "b", None),
        ])
        .await
        .unwrap();

    let report = env
        .session
        .remove(vec!["A.lnk".to_string(), "Z.lnk".to_string()])
        .await
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.errors[0].item, "Z.lnk");
    assert!(Notice::from_remove(&report).is_error());
    assert_eq!(
        env.session.list_shortcuts().await.unwrap().files,
        vec!["B.lnk"]
    );
}
