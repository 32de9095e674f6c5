//! Integration tests for CLI execution using `assert_cmd`.
//!
//! These tests invoke the compiled binary and verify the `build.ninja` files
//! it writes into the source directories.

mod common;

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use common::source_dir;
use predicates::str::contains;
use std::fs;

fn ninjagen() -> Result<Command> {
    let mut cmd = Command::cargo_bin("ninjagen").context("locate ninjagen binary")?;
    cmd.env_remove("NINJAGEN_COMPILER");
    Ok(cmd)
}

#[test]
fn modules_flag_writes_build_file() -> Result<()> {
    let (_temp, dir) = source_dir(&[("a.cpp", ""), ("b.cpp", "import a;\n")])?;
    ninjagen()?
        .arg("--modules")
        .arg(dir.as_str())
        .arg("--compiler")
        .arg("clang++")
        .assert()
        .success();

    let ninja = fs::read_to_string(dir.join("build.ninja")).context("read build.ninja")?;
    ensure!(
        ninja.ends_with("build a.pcm: cc-pcm a.cpp\nbuild b.o: cc b.cpp | a.pcm\n"),
        "unexpected output:\n{ninja}"
    );
    Ok(())
}

#[test]
fn headers_and_modules_write_separate_files() -> Result<()> {
    let (_hdr_temp, hdr) = source_dir(&[("x.cpp", ""), ("y.cpp", "")])?;
    let (_mod_temp, mods) = source_dir(&[("a.cpp", ""), ("b.cpp", "import a;\n")])?;
    ninjagen()?
        .args(["--headers", hdr.as_str(), "--modules", mods.as_str()])
        .args(["--compiler", "g++", "--all-artifacts"])
        .assert()
        .success();

    let headers = fs::read_to_string(hdr.join("build.ninja")).context("read headers build")?;
    let modules = fs::read_to_string(mods.join("build.ninja")).context("read modules build")?;
    ensure!(
        headers.contains("  command = g++ -c -O0 $in -o $out\n"),
        "unexpected header output:\n{headers}"
    );
    ensure!(
        modules.contains("build a.o: cc a.cpp\n") && modules.contains("build b.pcm: cc-pcm b.cpp | a.pcm\n"),
        "unexpected module output:\n{modules}"
    );
    Ok(())
}

#[test]
fn compiler_falls_back_to_environment() -> Result<()> {
    let (_temp, dir) = source_dir(&[("x.cpp", "")])?;
    ninjagen()?
        .env("NINJAGEN_COMPILER", "/opt/llvm/bin/clang++")
        .args(["--headers", dir.as_str()])
        .assert()
        .success();

    let ninja = fs::read_to_string(dir.join("build.ninja")).context("read build.ninja")?;
    ensure!(
        ninja.contains("command = /opt/llvm/bin/clang++ -c -O0"),
        "unexpected output:\n{ninja}"
    );
    Ok(())
}

#[test]
fn missing_compiler_is_rejected() -> Result<()> {
    let (_temp, dir) = source_dir(&[("x.cpp", "")])?;
    ninjagen()?
        .args(["--headers", dir.as_str()])
        .assert()
        .failure()
        .stderr(contains("--compiler"));
    ensure!(
        !dir.join("build.ninja").exists(),
        "no file should be written without a compiler"
    );
    Ok(())
}

#[test]
fn unreadable_directory_fails_with_diagnostic() -> Result<()> {
    let (_temp, dir) = source_dir(&[])?;
    ninjagen()?
        .args(["--modules", dir.join("missing").as_str(), "--compiler", "c++"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("does not exist or is not a directory"));
    Ok(())
}

#[test]
fn validate_flag_reports_unresolved_imports() -> Result<()> {
    let (_temp, dir) = source_dir(&[("main.cpp", "import missing;\n")])?;
    ninjagen()?
        .args(["--modules", dir.as_str(), "--compiler", "c++", "--validate"])
        .assert()
        .failure()
        .stderr(contains("main imports missing"));
    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> Result<()> {
    let (_temp, dir) = source_dir(&[
        ("a.cpp", ""),
        ("b.cpp", "import a;\n"),
        ("c.cpp", "import b;\nimport a;\n"),
    ])?;
    let run = || -> Result<Vec<u8>> {
        ninjagen()?
            .args(["--modules", dir.as_str(), "--compiler", "clang++"])
            .assert()
            .success();
        fs::read(dir.join("build.ninja")).context("read build.ninja")
    };
    let first = run()?;
    let second = run()?;
    ensure!(first == second, "outputs differ between runs");
    Ok(())
}

#[test]
fn warnings_need_verbose_flag() -> Result<()> {
    ninjagen()?
        .args(["--compiler", "c++"])
        .assert()
        .success()
        .stderr(predicates::str::is_empty());
    ninjagen()?
        .args(["--compiler", "c++", "-v"])
        .assert()
        .success()
        .stderr(contains("nothing to generate"));
    Ok(())
}
