use chapterize_api::domain::{
    ChapterBoundary, FailureKind, PipelineStage, TaskFailure, TaskRecord, TaskStatus,
    TaskTransitionError, Timecode,
};

fn boundary(start: u64, end: u64) -> ChapterBoundary {
    ChapterBoundary::new(
        Timecode::from_secs(start),
        Timecode::from_secs(end),
        Some("chapter".to_string()),
    )
}

#[test]
fn given_new_task_when_started_then_processing_at_zero_progress() {
    let record = TaskRecord::started();

    assert_eq!(record.status, TaskStatus::Processing);
    assert_eq!(record.progress, 0.0);
    assert_eq!(record.message, "Starting processing");
    assert_eq!(record.stage, Some(PipelineStage::Starting));
    assert!(record.chapters.is_none());
    assert!(record.failure.is_none());
}

#[test]
fn given_stages_in_order_when_advancing_then_progress_is_non_decreasing() {
    let mut record = TaskRecord::started();
    let mut last = record.progress;

    for stage in [
        PipelineStage::GeneratingTimecodes,
        PipelineStage::ParsingChapters,
        PipelineStage::SplittingAudiobook,
    ] {
        record.advance(stage).unwrap();
        assert!(record.progress >= last);
        assert_eq!(record.message, stage.message());
        last = record.progress;
    }

    assert_eq!(record.progress, 0.8);
    assert_eq!(record.message, "Splitting audiobook");
}

#[test]
fn given_later_stage_when_advancing_backwards_then_rejected() {
    let mut record = TaskRecord::started();
    record.advance(PipelineStage::ParsingChapters).unwrap();

    let result = record.advance(PipelineStage::GeneratingTimecodes);

    assert!(matches!(
        result,
        Err(TaskTransitionError::Backwards {
            from: PipelineStage::ParsingChapters,
            to: PipelineStage::GeneratingTimecodes
        })
    ));
    assert_eq!(record.progress, 0.6);
}

#[test]
fn given_processing_task_when_completed_then_full_progress_with_chapters() {
    let mut record = TaskRecord::started();
    record.advance(PipelineStage::SplittingAudiobook).unwrap();

    record.complete(vec![boundary(0, 60), boundary(60, 120)]).unwrap();

    assert_eq!(record.status, TaskStatus::Completed);
    assert_eq!(record.progress, 1.0);
    assert_eq!(record.message, "Processing completed");
    assert_eq!(record.chapters.as_ref().map(Vec::len), Some(2));
}

#[test]
fn given_processing_task_when_failed_then_zero_progress_and_detail_as_message() {
    let mut record = TaskRecord::started();
    record.advance(PipelineStage::GeneratingTimecodes).unwrap();

    record
        .fail(TaskFailure::new(
            FailureKind::TimecodeGeneration,
            "model not found",
        ))
        .unwrap();

    assert_eq!(record.status, TaskStatus::Failed);
    assert_eq!(record.progress, 0.0);
    assert_eq!(record.message, "model not found");
    assert_eq!(
        record.failure.as_ref().map(|f| f.kind),
        Some(FailureKind::TimecodeGeneration)
    );
}

#[test]
fn given_failure_without_detail_when_failed_then_message_names_the_kind() {
    let mut record = TaskRecord::started();

    record
        .fail(TaskFailure::new(FailureKind::Splitting, ""))
        .unwrap();

    assert_eq!(record.message, "splitting failed");
}

#[test]
fn given_finished_task_when_transitioning_again_then_rejected() {
    let mut completed = TaskRecord::started();
    completed.complete(Vec::new()).unwrap();

    assert!(matches!(
        completed.fail(TaskFailure::new(FailureKind::Internal, "late")),
        Err(TaskTransitionError::AlreadyFinished(TaskStatus::Completed))
    ));
    assert!(completed.advance(PipelineStage::SplittingAudiobook).is_err());
    assert_eq!(completed.status, TaskStatus::Completed);

    let mut failed = TaskRecord::started();
    failed
        .fail(TaskFailure::new(FailureKind::ChapterParsing, "bad input"))
        .unwrap();

    assert!(failed.complete(Vec::new()).is_err());
    assert_eq!(failed.status, TaskStatus::Failed);
    assert_eq!(failed.progress, 0.0);
}

#[test]
fn given_failed_record_when_serialized_then_enums_are_snake_case() {
    let mut record = TaskRecord::started();
    record
        .fail(TaskFailure::new(FailureKind::CoverartExtraction, "no stream"))
        .unwrap();

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["status"], "failed");
    assert_eq!(json["stage"], "starting");
    assert_eq!(json["failure"]["kind"], "coverart_extraction");
    assert_eq!(json["failure"]["detail"], "no stream");
}
