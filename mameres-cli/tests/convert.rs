mod helpers;

use helpers::{mameres, read, write_dat};
use predicates::prelude::*;
use tempfile::tempdir;

const LEGACY_BIOS_DAT: &str = r#"<?xml version="1.0"?>
<datafile>
    <header><name>FBNeo</name></header>
    <game name="pgm" runnable="no">
        <description>PGM (Polygame Master) System BIOS</description>
    </game>
</datafile>"#;

#[test]
fn legacy_runnable_no_writes_only_bios_listing() {
    let temp = tempdir().unwrap();
    let dat = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);
    let out = temp.path().join("out");

    mameres(temp.path())
        .arg(&dat)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 0 games, 1 BIOSes and 0 devices"))
        .stderr(predicate::str::contains(
            "No games found, skipped writing 'mamenames.xml'",
        ));

    let bioses = read(&out, "mamebioses.xml");
    let mut lines = bioses.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("<!-- Generated on "));
    assert!(header.ends_with(", from fbneo.dat -->"));
    assert_eq!(lines.collect::<Vec<_>>(), vec!["<bios>pgm</bios>"]);
    assert!(!out.join("mamenames.xml").exists());
    assert!(!out.join("mamedevices.xml").exists());
}

#[test]
fn romless_device_is_not_listed() {
    let temp = tempdir().unwrap();
    let dat = write_dat(
        temp.path(),
        "mame.xml",
        r#"<mame>
    <machine name="z80" isdevice="yes" runnable="no"><description>Zilog Z80</description></machine>
    <machine name="pacman"><description>Pac-Man (Midway)</description><rom name="pacman.6e"/></machine>
</mame>"#,
    );

    mameres(temp.path())
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "No devices found, skipped writing 'mamedevices.xml'",
        ));

    assert!(!temp.path().join("mamedevices.xml").exists());
    assert!(read(temp.path(), "mamenames.xml").contains("<mamename>pacman</mamename>"));
}

#[test]
fn first_listed_file_wins_for_duplicate_names() {
    let temp = tempdir().unwrap();
    let midway = write_dat(
        temp.path(),
        "midway.xml",
        r#"<mame><machine name="pacman"><description>Pac-Man (Midway)</description></machine></mame>"#,
    );
    let namco = write_dat(
        temp.path(),
        "namco.xml",
        r#"<mame><machine name="pacman"><description>Puck Man (Japan set 1)</description></machine></mame>"#,
    );

    let out_a = temp.path().join("a");
    mameres(temp.path())
        .args([&midway, &namco])
        .arg("-o")
        .arg(&out_a)
        .assert()
        .success();
    let names = read(&out_a, "mamenames.xml");
    assert!(names.contains("<realname>Pac-Man (Midway)</realname>"));
    assert!(!names.contains("Puck Man"));
    assert!(names.lines().next().unwrap().ends_with("from midway.xml, namco.xml -->"));

    let out_b = temp.path().join("b");
    mameres(temp.path())
        .args([&namco, &midway])
        .arg("-o")
        .arg(&out_b)
        .assert()
        .success();
    let names = read(&out_b, "mamenames.xml");
    assert!(names.contains("<realname>Puck Man (Japan set 1)</realname>"));
    assert!(!names.contains("Midway"));
}

#[test]
fn missing_file_is_skipped() {
    let temp = tempdir().unwrap();
    let dat = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);
    let missing = temp.path().join("does-not-exist.xml");

    mameres(temp.path())
        .arg(&missing)
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .code(0)
        .stderr(predicate::str::contains("does-not-exist.xml not found, skipping"));

    let bioses = read(temp.path(), "mamebioses.xml");
    assert!(bioses.contains("<bios>pgm</bios>"));
    assert!(!bioses.contains("does-not-exist"));
}

#[test]
fn bios_and_device_machine_is_only_a_bios() {
    let temp = tempdir().unwrap();
    let dat = write_dat(
        temp.path(),
        "mame.xml",
        r#"<mame>
    <machine name="both" isbios="yes" isdevice="yes"><rom name="b.bin"/></machine>
    <machine name="namco51" isdevice="yes"><rom name="51xx.bin"/></machine>
</mame>"#,
    );

    mameres(temp.path())
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success();

    assert!(read(temp.path(), "mamebioses.xml").contains("<bios>both</bios>"));
    let devices = read(temp.path(), "mamedevices.xml");
    assert!(!devices.contains("both"));
    assert!(devices.contains("<device>namco51</device>"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let temp = tempdir().unwrap();
    mameres(temp.path())
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
    assert!(!temp.path().join("mamenames.xml").exists());
}

#[test]
fn unparseable_file_is_skipped_and_left_out_of_provenance() {
    let temp = tempdir().unwrap();
    let broken = write_dat(
        temp.path(),
        "broken.xml",
        r#"<mame><machine name="pacman"><description>Pac-Man</description>"#,
    );
    let good = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);

    mameres(temp.path())
        .arg(&broken)
        .arg(&good)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.xml cannot be parsed as XML"));

    let bioses = read(temp.path(), "mamebioses.xml");
    assert!(bioses.lines().next().unwrap().ends_with("from fbneo.dat -->"));
    assert!(!temp.path().join("mamenames.xml").exists());
}

#[test]
fn malformed_record_is_skipped_with_warning() {
    let temp = tempdir().unwrap();
    let dat = write_dat(
        temp.path(),
        "mame.xml",
        r#"<mame>
    <machine name="nodesc"><rom name="x"/></machine>
    <machine name="galaga"><description>Galaga (Namco rev. B)</description></machine>
</mame>"#,
    );

    mameres(temp.path())
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("romset 'nodesc' has no description"));

    let names = read(temp.path(), "mamenames.xml");
    assert!(names.contains("<mamename>galaga</mamename>"));
    assert!(!names.contains("nodesc"));
}

#[test]
fn nothing_found_still_exits_cleanly() {
    let temp = tempdir().unwrap();
    let dat = write_dat(temp.path(), "empty.xml", "<datafile></datafile>");

    mameres(temp.path())
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 0 games, 0 BIOSes and 0 devices"));

    for name in ["mamenames.xml", "mamebioses.xml", "mamedevices.xml"] {
        assert!(!temp.path().join(name).exists());
    }
}

#[test]
fn writes_to_current_directory_by_default() {
    let temp = tempdir().unwrap();
    let dat = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);

    mameres(temp.path())
        .current_dir(temp.path())
        .arg(&dat)
        .assert()
        .success();

    assert!(temp.path().join("mamebioses.xml").is_file());
}

// dirs::config_dir follows XDG_CONFIG_HOME on Linux only.
#[cfg(target_os = "linux")]
#[test]
fn settings_file_sets_output_directory() {
    let temp = tempdir().unwrap();
    let config_dir = temp.path().join("mameres");
    let out = temp.path().join("from-settings");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("settings.toml"),
        format!("[output]\ndir = {:?}\n", out.to_string_lossy()),
    )
    .unwrap();
    let dat = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);

    mameres(temp.path())
        .current_dir(temp.path())
        .arg(&dat)
        .assert()
        .success();

    assert!(out.join("mamebioses.xml").is_file());
    assert!(!temp.path().join("mamebioses.xml").exists());
}

#[test]
fn quiet_hides_progress_but_keeps_warnings() {
    let temp = tempdir().unwrap();
    let dat = write_dat(temp.path(), "fbneo.dat", LEGACY_BIOS_DAT);

    mameres(temp.path())
        .arg("--quiet")
        .arg(temp.path().join("missing.xml"))
        .arg(&dat)
        .arg("-o")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Reading file").not())
        .stderr(predicate::str::contains("missing.xml not found"));
}
