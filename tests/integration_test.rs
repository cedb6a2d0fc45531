use assert_cmd::Command;
use assert_cmd::cargo;
use std::path::Path;
use tempfile::tempdir;

fn write_dist_info(root: &Path, dir_name: &str, metadata: &str, entry_points: Option<&str>) {
    let dist_info = root.join(dir_name);
    std::fs::create_dir_all(&dist_info).unwrap();
    std::fs::write(dist_info.join("METADATA"), metadata).unwrap();
    if let Some(content) = entry_points {
        std::fs::write(dist_info.join("entry_points.txt"), content).unwrap();
    }
}

fn create_site_packages(root: &Path) {
    write_dist_info(
        root,
        "package1-1.0.dist-info",
        "Metadata-Version: 2.1\n\
         Name: package1\n\
         Version: 1.0\n\
         Summary: A test package\n\
         Author: Test Author\n\
         Author-email: test@example.com\n",
        Some("[console_scripts]\nscript1 = package1.cli:main\n"),
    );
    write_dist_info(
        root,
        "package2-2.0.dist-info",
        "Metadata-Version: 2.1\n\
         Name: package2\n\
         Version: 2.0\n\
         Summary: Another test package\n\
         Author: Another Author\n\
         Author-email: another@example.com\n\
         Requires-Dist: requests>=2.0\n\
         Requires-Dist: click\n",
        None,
    );
}

#[test]
fn test_scan_single_email() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains(
            "Found 1 packages by test@example.com:",
        ))
        .stdout(predicates::str::contains("package1:"))
        .stdout(predicates::str::contains("Version: 1.0"))
        .stdout(predicates::str::contains("Summary: A test package"))
        .stdout(predicates::str::contains("script1"));
}

#[test]
fn test_scan_multiple_emails() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .arg("another@example.com")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 2 packages by"))
        .stdout(predicates::str::contains("package1:"))
        .stdout(predicates::str::contains("package2:"));
}

#[test]
fn test_scan_email_is_case_insensitive() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("TEST@EXAMPLE.COM")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 1 packages by"))
        .stdout(predicates::str::contains("package1:"));
}

#[test]
fn test_scan_no_match() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("nobody@example.com")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 0 packages"));
}

#[test]
fn test_scan_all_packages_without_emails() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("--packages-folder").arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 2 packages:"))
        .stdout(predicates::str::contains("package1:"))
        .stdout(predicates::str::contains("package2:"));
}

#[test]
fn test_scan_requirements_flag() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("another@example.com")
        .arg("--requirements")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Requirements:"))
        .stdout(predicates::str::contains("requests>=2.0"))
        .stdout(predicates::str::contains("click"));
}

#[test]
fn test_scan_save_json() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());
    let work = tempdir().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .arg("--save-json")
        .arg("--packages-folder")
        .arg(site.path())
        .current_dir(work.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Results saved to packages.json"));

    let json = std::fs::read_to_string(work.path().join("packages.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let package1 = &parsed["package1"];
    assert_eq!(package1["Name"], "package1");
    assert_eq!(package1["Version"], "1.0");
    assert_eq!(package1["entry_points"], serde_json::json!(["script1"]));
}

#[test]
fn test_scan_skips_dist_info_without_metadata() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());
    std::fs::create_dir_all(site.path().join("broken-0.1.dist-info")).unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 1 packages by"));
}

#[test]
fn test_scan_rejects_invalid_email() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("not-an-email")
        .arg("--packages-folder")
        .arg(site.path());

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid author email"));
}

#[test]
fn test_scan_rejects_missing_folder() {
    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .arg("--packages-folder")
        .arg("/nonexistent/site-packages");

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));
}

#[test]
fn test_packages_folder_from_environment() {
    let site = tempdir().unwrap();
    create_site_packages(site.path());

    let mut cmd = Command::new(cargo::cargo_bin!("distscan"));
    cmd.arg("test@example.com")
        .env("DISTSCAN_PACKAGES_FOLDER", site.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Found 1 packages by"));
}
