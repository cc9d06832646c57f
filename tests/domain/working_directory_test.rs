use std::path::Path;

use chapterize_api::domain::{TaskId, WorkingDirectory, sanitize_filename};

#[test]
fn given_task_id_when_creating_workspace_then_root_is_base_slash_id() {
    let id = TaskId::new();
    let workspace = WorkingDirectory::new(id, Path::new("/srv/tasks"));

    assert_eq!(workspace.root(), Path::new("/srv/tasks").join(id.to_string()));
    assert_eq!(workspace.output_dir(), workspace.root().join("output"));
    assert_eq!(workspace.file_path("book.mp3"), workspace.root().join("book.mp3"));
}

#[test]
fn given_workspace_when_building_object_keys_then_relative_to_base() {
    let id = TaskId::new();
    let workspace = WorkingDirectory::new(id, Path::new("/srv/tasks"));

    assert_eq!(workspace.object_key("book.mp3"), format!("{}/book.mp3", id));
    assert_eq!(workspace.output_prefix(), format!("{}/output", id));
}

#[test]
fn given_path_traversal_when_sanitizing_then_only_file_name_kept() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("C:\\books\\dune.m4b"), "dune.m4b");
}

#[test]
fn given_spaces_and_symbols_when_sanitizing_then_replaced_with_underscore() {
    assert_eq!(sanitize_filename("My Book (part 1).mp3"), "My_Book__part_1_.mp3");
}

#[test]
fn given_empty_or_dot_name_when_sanitizing_then_fallback_used() {
    assert_eq!(sanitize_filename(""), "upload.bin");
    assert_eq!(sanitize_filename(".."), "upload.bin");
    assert_eq!(sanitize_filename("???"), "upload.bin");
}

#[test]
fn given_task_id_when_round_tripped_through_string_then_equal() {
    let id = TaskId::new();

    assert_eq!(id.to_string().parse::<TaskId>().unwrap(), id);
    assert!("not-a-uuid".parse::<TaskId>().is_err());
}
