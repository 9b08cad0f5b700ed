use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_session(input: &str, cwd: &Path) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_micro_shell"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn micro_shell");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("write input");
    child.wait_with_output().expect("wait for micro_shell")
}

fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn assignment_and_echo_then_exit() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_session("X=hello\necho $X\nexit\n", dir.path());

    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert!(stdout.contains("hello\n"), "stdout was {:?}", stdout);
    assert!(stdout.contains("Good Bye"), "stdout was {:?}", stdout);
}

#[test]
fn end_of_input_says_good_bye() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_session("echo one\n", dir.path());

    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert!(stdout.contains("one\n"));
    assert!(stdout.contains("Good Bye"));
}

#[test]
fn exit_stops_reading_lines() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_session("exit\necho after_exit\n", dir.path());

    assert!(out.status.success());
    assert!(!stdout_of(&out).contains("after_exit"));
}

#[test]
fn errors_are_reported_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    let input = "cd /nonexistent_micro_shell_dir\n\
                 ls >\n\
                 1abc=val\n\
                 micro_shell_missing_program\n\
                 echo still here\n";
    let out = run_session(input, dir.path());

    assert!(out.status.success());
    let stderr = stderr_of(&out);
    assert!(stderr.contains("cd: /nonexistent_micro_shell_dir"), "{}", stderr);
    assert!(stderr.contains("no output file specified"), "{}", stderr);
    assert!(stderr.contains("invalid variable name: '1abc'"), "{}", stderr);
    assert!(
        stderr.contains("micro_shell_missing_program: command not found"),
        "{}",
        stderr
    );
    assert!(stdout_of(&out).contains("still here\n"));
}

#[test]
fn redirected_listing_lands_in_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("visible_entry"), "").unwrap();

    let out = run_session("ls > out.txt\n", dir.path());

    assert!(out.status.success());
    let listing = fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(listing.contains("visible_entry"));
    assert!(!stdout_of(&out).contains("visible_entry"));
}

#[test]
fn cd_changes_directory_for_later_commands() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let out = run_session("cd sub\nprintf x > marker\n", dir.path());

    assert!(out.status.success());
    assert!(dir.path().join("sub").join("marker").exists());
}

#[test]
fn exported_variable_is_inherited() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_session(
        "GREETING=hi_there\nexport GREETING\nprintenv GREETING > env.txt\n",
        dir.path(),
    );

    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("env.txt")).unwrap(),
        "hi_there\n"
    );
}
