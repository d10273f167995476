use super::*;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("file_info").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn existing_input_is_accepted() {
    let dir = scratch_dir("input_ok");
    let path = dir.join("in.wav");
    std::fs::write(&path, b"RIFF").unwrap();
    validate_input_file(&path).unwrap();
}

#[test]
fn missing_input_is_a_path_error() {
    let dir = scratch_dir("input_missing");
    let err = validate_input_file(&dir.join("nope.wav")).unwrap_err();
    assert!(matches!(err, SoxError::Path(_)));
}

#[test]
fn directory_input_is_rejected() {
    let dir = scratch_dir("input_dir");
    assert!(matches!(
        validate_input_file(&dir).unwrap_err(),
        SoxError::Path(_)
    ));
}

#[test]
fn output_in_existing_directory_is_accepted_even_if_file_exists() {
    let dir = scratch_dir("output_ok");
    let path = dir.join("out.wav");
    validate_output_file(&path).unwrap();
    std::fs::write(&path, b"old").unwrap();
    validate_output_file(&path).unwrap();
}

#[test]
fn output_in_missing_directory_is_rejected() {
    let dir = scratch_dir("output_missing");
    let err = validate_output_file(&dir.join("no_such_dir").join("out.wav")).unwrap_err();
    assert!(matches!(err, SoxError::Path(_)));
}

#[test]
fn bare_file_name_resolves_against_current_dir() {
    validate_output_file(Path::new("out.wav")).unwrap();
}

#[test]
fn output_directory_is_checked_by_writing_into_it() {
    let dir = scratch_dir("output_write_check");
    validate_output_file(&dir.join("out.wav")).unwrap();
    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(".soxchain-write-check"))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn unwritable_output_directory_is_rejected() {
    use std::os::unix::fs::PermissionsExt as _;

    let dir = scratch_dir("output_unwritable");
    let locked = dir.join("locked");
    std::fs::create_dir_all(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users write through any mode bits.
    let privileged = std::fs::write(locked.join("canary"), b"").is_ok();
    let result = validate_output_file(&locked.join("out.wav"));

    let _ = std::fs::remove_file(locked.join("canary"));
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    if privileged {
        result.unwrap();
    } else {
        assert!(matches!(result.unwrap_err(), SoxError::Path(_)));
    }
}
